mod request;

pub use request::RequestFetcher;

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;

/// Body and final location of a fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the body was served from, after redirects
    pub url: Url,
    pub body: Vec<u8>,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchedPage, FetchError>;
}

/// Resolve a recipe identifier against the site's base URL.
///
/// Bare identifiers (`231495`, `231495/texas-boiled-beer-shrimp`) map to
/// `{base}/recipe/{identifier}`. Full URLs are accepted only for the base host, with
/// or without a `www.` prefix, and lose their query string and fragment.
pub fn resolve_identifier(base: &Url, identifier: &str) -> Result<Url, FetchError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(FetchError::InvalidIdentifier("identifier cannot be empty".to_string()));
    }

    if identifier.starts_with("http://") || identifier.starts_with("https://") {
        let mut url = Url::parse(identifier)
            .map_err(|e| FetchError::InvalidIdentifier(format!("{identifier}: {e}")))?;
        if !same_site(base, &url) {
            return Err(FetchError::InvalidIdentifier(format!(
                "expected {} host name, got {}",
                base.host_str().unwrap_or_default(),
                url.host_str().unwrap_or_default()
            )));
        }
        url.set_query(None);
        url.set_fragment(None);
        return Ok(url);
    }

    let path = identifier.trim_matches('/');
    if path.is_empty() || path.contains("..") || path.contains(['?', '#']) {
        return Err(FetchError::InvalidIdentifier(identifier.to_string()));
    }

    let base_path = base.path().trim_end_matches('/');
    let mut url = base.clone();
    url.set_path(&format!("{base_path}/recipe/{path}"));
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn same_site(base: &Url, candidate: &Url) -> bool {
    let strip = |host: &str| host.trim_start_matches("www.").to_ascii_lowercase();
    match (base.host_str(), candidate.host_str()) {
        (Some(expected), Some(actual)) => {
            strip(expected) == strip(actual) && base.port() == candidate.port()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://www.allrecipes.com").unwrap()
    }

    #[test]
    fn test_numeric_identifier() {
        let url = resolve_identifier(&base(), "231495").unwrap();
        assert_eq!(url.as_str(), "https://www.allrecipes.com/recipe/231495");
    }

    #[test]
    fn test_identifier_with_slug() {
        let url = resolve_identifier(&base(), "/231495/texas-boiled-beer-shrimp/").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.allrecipes.com/recipe/231495/texas-boiled-beer-shrimp"
        );
    }

    #[test]
    fn test_full_url_drops_query() {
        let url = resolve_identifier(
            &base(),
            "http://allrecipes.com/recipe/11772/spaghetti-pie-i/?clickId=right%20rail0&internalSource=rr_feed_recipe_sb",
        )
        .unwrap();
        assert_eq!(url.as_str(), "http://allrecipes.com/recipe/11772/spaghetti-pie-i/");

        let url = resolve_identifier(
            &base(),
            "https://allrecipes.com/recipe/11772/spaghetti-pie-i/?clickId=right%20rail0#reviews",
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://allrecipes.com/recipe/11772/spaghetti-pie-i/");
    }

    #[test]
    fn test_foreign_host_rejected() {
        let err = resolve_identifier(&base(), "https://example.com/recipe/1").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("example.com"));
    }

    #[test]
    fn test_empty_and_traversal_rejected() {
        assert!(resolve_identifier(&base(), "   ").is_err());
        assert!(resolve_identifier(&base(), "/").is_err());
        assert!(resolve_identifier(&base(), "../admin").is_err());
        assert!(resolve_identifier(&base(), "1?x=2").is_err());
    }

    #[test]
    fn test_base_with_port_and_path() {
        let base = Url::parse("http://127.0.0.1:4010/mirror/").unwrap();
        let url = resolve_identifier(&base, "42").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:4010/mirror/recipe/42");

        let url = resolve_identifier(&base, "http://127.0.0.1:4010/recipe/42?a=b").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:4010/recipe/42");
    }
}
