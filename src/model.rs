use serde::{Deserialize, Serialize};

/// A recipe extracted from one fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Identifier the page was requested with
    pub recipe_id: String,
    /// URL actually fetched, after redirects
    pub source_url: String,
    pub author: Option<String>,
    pub name: Option<String>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub directions: Vec<String>,
    pub footnotes: Vec<String>,
}

impl Recipe {
    /// Empty recipe bound to the page it will be extracted from
    pub fn new(recipe_id: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            recipe_id: recipe_id.into(),
            source_url: source_url.into(),
            ..Default::default()
        }
    }
}
