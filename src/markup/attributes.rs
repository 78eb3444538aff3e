use super::Attribute;

/// True if some attribute has exactly this key and exactly this value.
pub fn has_attribute(attributes: &[Attribute], key: &str, value: &str) -> bool {
    attributes.iter().any(|a| a.key == key && a.value == value)
}

/// Value of the first attribute named `key`.
pub fn attribute_value<'a>(attributes: &'a [Attribute], key: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|a| a.key == key)
        .map(|a| a.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs() -> Vec<Attribute> {
        vec![
            Attribute::new("class", "recipe-directions__list--item"),
            Attribute::new("ng-bind", "model.itemNote"),
            Attribute::new("class", "second"),
        ]
    }

    #[test]
    fn test_has_attribute_exact_match() {
        let attrs = attrs();
        assert!(has_attribute(&attrs, "class", "recipe-directions__list--item"));
        assert!(has_attribute(&attrs, "ng-bind", "model.itemNote"));
    }

    #[test]
    fn test_has_attribute_is_not_prefix_or_case_insensitive() {
        let attrs = attrs();
        assert!(!has_attribute(&attrs, "class", "recipe-directions"));
        assert!(!has_attribute(&attrs, "class", "Recipe-Directions__list--item"));
        assert!(!has_attribute(&attrs, "CLASS", "second"));
        assert!(!has_attribute(&attrs, "class", " second"));
    }

    #[test]
    fn test_attribute_value_returns_first() {
        let attrs = attrs();
        assert_eq!(
            attribute_value(&attrs, "class"),
            Some("recipe-directions__list--item")
        );
        assert_eq!(attribute_value(&attrs, "content"), None);
        assert_eq!(attribute_value(&[], "content"), None);
    }
}
