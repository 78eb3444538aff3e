use std::io::Cursor;

use log::debug;
use url::Url;

use crate::error::ExtractionError;
use crate::extractors::{extract_recipe, CaptureObserver, RuleSet};
use crate::fetchers::{resolve_identifier, PageFetcher};
use crate::markup::HtmlTokenSource;
use crate::model::Recipe;

/// Fetch the page behind `identifier` and walk its markup.
///
/// This pipeline:
/// 1. Resolves the identifier against `base`
/// 2. Fetches the page with `fetcher`
/// 3. Tokenizes the body and runs the field walk over it
///
/// The returned recipe carries the identifier, trimmed of surrounding whitespace, as
/// its id and the post-redirect URL as its source.
pub async fn process(
    fetcher: &dyn PageFetcher,
    base: &Url,
    identifier: &str,
    rules: &RuleSet,
    observer: &dyn CaptureObserver,
) -> Result<Recipe, ExtractionError> {
    let identifier = identifier.trim();
    let url = resolve_identifier(base, identifier)?;
    let page = fetcher.fetch(&url).await?;

    let recipe = Recipe::new(identifier, page.url.as_str());
    let source = HtmlTokenSource::new(Cursor::new(page.body));
    let recipe = extract_recipe(source, recipe, rules, observer)?;

    debug!(
        "Extracted {} ingredients, {} directions, {} footnotes from {}",
        recipe.ingredients.len(),
        recipe.directions.len(),
        recipe.footnotes.len(),
        recipe.source_url
    );
    Ok(recipe)
}
