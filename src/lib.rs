pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod markup;
pub mod model;
pub mod pipelines;
pub mod server;

use std::io::Read;

pub use builder::{RecipeParser, RecipeParserBuilder};
pub use config::ServiceConfig;
pub use error::{BuilderError, ExtractionError, FetchError};
pub use extractors::{CaptureObserver, Field, LogObserver, NoopObserver, RuleSet};
pub use model::Recipe;

/// Fetch and extract a recipe from allrecipes.com with default settings.
///
/// `identifier` is either a recipe id such as `231495` or a full allrecipes URL.
pub async fn fetch_recipe(identifier: &str) -> Result<Recipe, ExtractionError> {
    let parser = RecipeParser::builder().build()?;
    parser.extract(identifier).await
}

/// Extract a recipe from already fetched allrecipes markup.
pub fn parse_recipe<R: Read>(
    markup: R,
    recipe_id: &str,
    source_url: &str,
) -> Result<Recipe, ExtractionError> {
    extractors::extract_recipe(
        markup::HtmlTokenSource::new(markup),
        Recipe::new(recipe_id, source_url),
        &RuleSet::allrecipes(),
        &LogObserver,
    )
}
