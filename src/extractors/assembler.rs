use log::warn;

use super::Field;
use crate::model::Recipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// A scalar field already held a value; the new one was dropped
    Duplicate,
    /// The field is not stored on the record
    Ignored,
}

/// Store `value` into the recipe field that `field` targets.
///
/// Scalar fields keep the first value they receive; sequence fields append in
/// document order. Footnote headers are never stored on their own.
pub fn write_field(recipe: &mut Recipe, field: Field, value: String) -> WriteOutcome {
    let slot = match field {
        Field::Name => &mut recipe.name,
        Field::Author => &mut recipe.author,
        Field::Description => &mut recipe.description,
        Field::Image => &mut recipe.image_url,
        Field::Ingredient => return append(&mut recipe.ingredients, value),
        Field::Direction => return append(&mut recipe.directions, value),
        Field::Footnote => return append(&mut recipe.footnotes, value),
        Field::FootnoteHeader => return WriteOutcome::Ignored,
    };

    if let Some(existing) = slot.as_deref() {
        warn!(
            "Duplicate {} on {}: keeping {:?}, ignoring {:?}",
            field, recipe.source_url, existing, value
        );
        return WriteOutcome::Duplicate;
    }
    *slot = Some(value);
    WriteOutcome::Written
}

fn append(items: &mut Vec<String>, value: String) -> WriteOutcome {
    items.push(value);
    WriteOutcome::Written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_first_match_wins() {
        let mut recipe = Recipe::new("1", "https://www.allrecipes.com/recipe/1");

        assert_eq!(
            write_field(&mut recipe, Field::Author, "Kimberley".to_string()),
            WriteOutcome::Written
        );
        assert_eq!(
            write_field(&mut recipe, Field::Author, "Someone Else".to_string()),
            WriteOutcome::Duplicate
        );
        assert_eq!(recipe.author.as_deref(), Some("Kimberley"));
    }

    #[test]
    fn test_sequences_append_in_order() {
        let mut recipe = Recipe::new("1", "https://www.allrecipes.com/recipe/1");
        for item in ["a", "b", "a"] {
            write_field(&mut recipe, Field::Ingredient, item.to_string());
        }
        write_field(&mut recipe, Field::Footnote, "Tip: chill".to_string());

        assert_eq!(recipe.ingredients, vec!["a", "b", "a"]);
        assert_eq!(recipe.footnotes, vec!["Tip: chill"]);
        assert!(recipe.directions.is_empty());
    }

    #[test]
    fn test_footnote_header_is_not_stored() {
        let mut recipe = Recipe::new("1", "https://www.allrecipes.com/recipe/1");
        assert_eq!(
            write_field(&mut recipe, Field::FootnoteHeader, "Nutrition:".to_string()),
            WriteOutcome::Ignored
        );
        assert_eq!(recipe, Recipe::new("1", "https://www.allrecipes.com/recipe/1"));
    }
}
