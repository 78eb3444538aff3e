//! Token-stream extraction of recipe fields.

mod assembler;
mod rules;
mod walk;

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

pub use assembler::{write_field, WriteOutcome};
pub use rules::{AttributeTest, FieldRule, ImageRule, RuleSet};
pub use walk::{extract_recipe, FieldWalker};

/// Output field a rule captures into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Author,
    Description,
    Image,
    Ingredient,
    Direction,
    /// Section title that starts the footnote sub-walk
    FootnoteHeader,
    /// List item paired with the preceding footnote header
    Footnote,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Author => "author",
            Field::Description => "description",
            Field::Image => "image",
            Field::Ingredient => "ingredient",
            Field::Direction => "direction",
            Field::FootnoteHeader => "footnote header",
            Field::Footnote => "footnote",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notified after every successful field capture
pub trait CaptureObserver: Send + Sync {
    fn captured(&self, field: Field, value: &str);
}

/// Logs each capture at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl CaptureObserver for LogObserver {
    fn captured(&self, field: Field, value: &str) {
        debug!("{}> {}", field, value);
    }
}

/// Ignores captures
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CaptureObserver for NoopObserver {
    fn captured(&self, _field: Field, _value: &str) {}
}

/// Normalize captured text: decode HTML entities, then drop CR and LF characters.
pub fn normalize_text(raw: &str) -> String {
    html_escape::decode_html_entities(raw)
        .chars()
        .filter(|c| *c != '\r' && *c != '\n')
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Spaghetti Pie I"), "Spaghetti Pie I");
        assert_eq!(normalize_text("\r\n  Mac &amp; Cheese\n"), "  Mac & Cheese");
        assert_eq!(normalize_text("Line&#10;break"), "Linebreak");
        assert_eq!(normalize_text("&quot;Family favorite.&quot;"), "\"Family favorite.\"");
    }

    #[test]
    fn test_field_serde_names() {
        let field: Field = serde_json::from_str("\"footnote_header\"").unwrap();
        assert_eq!(field, Field::FootnoteHeader);
        assert_eq!(serde_json::to_string(&Field::Ingredient).unwrap(), "\"ingredient\"");
        assert_eq!(Field::FootnoteHeader.to_string(), "footnote header");
    }
}
