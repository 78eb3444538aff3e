use std::io::Read;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::config::ServiceConfig;
use crate::error::{BuilderError, ExtractionError};
use crate::extractors::{extract_recipe, CaptureObserver, LogObserver, NoopObserver, RuleSet};
use crate::fetchers::{PageFetcher, RequestFetcher};
use crate::markup::HtmlTokenSource;
use crate::model::Recipe;
use crate::pipelines;

pub const DEFAULT_BASE_URL: &str = "https://www.allrecipes.com";

/// Builder for configuring a [`RecipeParser`]
#[derive(Default)]
pub struct RecipeParserBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    rules: Option<RuleSet>,
    observer: Option<Arc<dyn CaptureObserver>>,
    fetcher: Option<Arc<dyn PageFetcher>>,
}

impl RecipeParserBuilder {
    /// Set the site that bare identifiers are resolved against
    ///
    /// # Example
    /// ```
    /// use allrecipes_parser::RecipeParser;
    ///
    /// let builder = RecipeParser::builder()
    ///     .base_url("https://www.allrecipes.com");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use allrecipes_parser::RecipeParser;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeParser::builder()
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Replace the built-in allrecipes rule set
    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Receive every captured field. Defaults to [`LogObserver`].
    pub fn observer(mut self, observer: Arc<dyn CaptureObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Do not report captured fields anywhere
    pub fn quiet(self) -> Self {
        self.observer(Arc::new(NoopObserver))
    }

    /// Use a custom fetcher instead of plain HTTP requests.
    ///
    /// `timeout` and `user_agent` only apply to the default fetcher.
    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Build the parser
    ///
    /// # Errors
    /// Returns `BuilderError` if the base URL does not parse or the HTTP client
    /// cannot be created.
    pub fn build(self) -> Result<RecipeParser, BuilderError> {
        let base = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(base).map_err(|source| BuilderError::InvalidBaseUrl {
            url: base.to_string(),
            source,
        })?;

        let fetcher: Arc<dyn PageFetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(RequestFetcher::new(
                self.timeout,
                self.user_agent.as_deref(),
            )?),
        };

        let observer: Arc<dyn CaptureObserver> = match self.observer {
            Some(observer) => observer,
            None => Arc::new(LogObserver),
        };

        Ok(RecipeParser {
            base_url,
            rules: self.rules.unwrap_or_default(),
            observer,
            fetcher,
        })
    }
}

/// Fetches recipe pages and extracts [`Recipe`]s from them.
///
/// Cheap to share: every call to [`RecipeParser::extract`] runs an independent walk.
pub struct RecipeParser {
    base_url: Url,
    rules: RuleSet,
    observer: Arc<dyn CaptureObserver>,
    fetcher: Arc<dyn PageFetcher>,
}

impl RecipeParser {
    /// Creates a new builder
    ///
    /// # Example
    /// ```
    /// use allrecipes_parser::RecipeParser;
    ///
    /// let parser = RecipeParser::builder().quiet().build().unwrap();
    /// ```
    pub fn builder() -> RecipeParserBuilder {
        RecipeParserBuilder::default()
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, BuilderError> {
        let mut builder = Self::builder()
            .base_url(config.base_url.clone())
            .timeout(Duration::from_secs(config.timeout))
            .rules(config.rules());
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if !config.trace_captures {
            builder = builder.quiet();
        }
        builder.build()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Fetch the page for `identifier` and extract its recipe
    ///
    /// # Example
    /// ```no_run
    /// # use allrecipes_parser::RecipeParser;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let parser = RecipeParser::builder().build()?;
    /// let recipe = parser.extract("231495").await?;
    /// println!("{:?}", recipe.name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn extract(&self, identifier: &str) -> Result<Recipe, ExtractionError> {
        pipelines::url::process(
            self.fetcher.as_ref(),
            &self.base_url,
            identifier,
            &self.rules,
            self.observer.as_ref(),
        )
        .await
    }

    /// Extract a recipe from markup that has already been fetched
    pub fn parse<R: Read>(
        &self,
        markup: R,
        recipe_id: &str,
        source_url: &str,
    ) -> Result<Recipe, ExtractionError> {
        extract_recipe(
            HtmlTokenSource::new(markup),
            Recipe::new(recipe_id, source_url),
            &self.rules,
            self.observer.as_ref(),
        )
    }
}
