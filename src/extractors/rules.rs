use serde::{Deserialize, Serialize};

use super::Field;
use crate::markup::{attribute_value, has_attribute, Tag};

/// Exact `key=value` attribute requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTest {
    pub key: String,
    pub value: String,
}

impl AttributeTest {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn matches(&self, tag: &Tag) -> bool {
        has_attribute(&tag.attributes, &self.key, &self.value)
    }
}

/// Start tag pattern whose following text is captured into `field`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub tag: String,
    pub require: AttributeTest,
    /// Tags carrying this attribute are skipped even if `require` matches
    #[serde(default)]
    pub exclude: Option<AttributeTest>,
    pub field: Field,
}

impl FieldRule {
    pub fn new(tag: impl Into<String>, require: AttributeTest, field: Field) -> Self {
        Self {
            tag: tag.into(),
            require,
            exclude: None,
            field,
        }
    }

    pub fn excluding(mut self, exclude: AttributeTest) -> Self {
        self.exclude = Some(exclude);
        self
    }

    pub fn matches(&self, tag: &Tag) -> bool {
        tag.name == self.tag
            && self.require.matches(tag)
            && !self.exclude.as_ref().is_some_and(|e| e.matches(tag))
    }
}

/// Self-closing tag pattern whose attribute value is captured directly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRule {
    pub tag: String,
    pub require: AttributeTest,
    pub value_attribute: String,
}

impl ImageRule {
    pub fn matches(&self, tag: &Tag) -> bool {
        tag.name == self.tag && self.require.matches(tag)
    }

    pub fn value<'a>(&self, tag: &'a Tag) -> Option<&'a str> {
        attribute_value(&tag.attributes, &self.value_attribute)
    }
}

/// Ordered rules describing where one site keeps its recipe fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Tried in order against every start tag; first match wins
    pub fields: Vec<FieldRule>,
    #[serde(default)]
    pub images: Vec<ImageRule>,
    /// Element whose text completes a footnote
    #[serde(default = "default_footnote_item_tag")]
    pub footnote_item_tag: String,
}

fn default_footnote_item_tag() -> String {
    "li".to_string()
}

impl RuleSet {
    /// Markup used by allrecipes.com recipe pages
    pub fn allrecipes() -> Self {
        // <h1 class="recipe-summary__h1" itemprop="name">Spaghetti Pie I</h1>
        // <span class="submitter__name" itemprop="author">Kimberley</span>
        // <div class="submitter__description" itemprop="description">...</div>
        // <span class="recipe-ingred_txt added" ... itemprop="ingredients">
        // <span class="recipe-directions__list--item" ...>
        // <span class="recipe-footnotes__header">Nutrition:</span>
        let fields = vec![
            FieldRule::new("h1", AttributeTest::new("itemprop", "name"), Field::Name),
            FieldRule::new("span", AttributeTest::new("itemprop", "author"), Field::Author),
            FieldRule::new(
                "div",
                AttributeTest::new("itemprop", "description"),
                Field::Description,
            ),
            FieldRule::new(
                "span",
                AttributeTest::new("itemprop", "ingredients"),
                Field::Ingredient,
            ),
            FieldRule::new(
                "span",
                AttributeTest::new("class", "recipe-directions__list--item"),
                Field::Direction,
            )
            .excluding(AttributeTest::new("ng-bind", "model.itemNote")),
            FieldRule::new(
                "span",
                AttributeTest::new("class", "recipe-footnotes__header"),
                Field::FootnoteHeader,
            ),
        ];

        // <meta property="og:image" content="https://images.media-allrecipes.com/..." />
        let images = vec![ImageRule {
            tag: "meta".to_string(),
            require: AttributeTest::new("property", "og:image"),
            value_attribute: "content".to_string(),
        }];

        Self {
            fields,
            images,
            footnote_item_tag: default_footnote_item_tag(),
        }
    }

    pub fn match_start_tag(&self, tag: &Tag) -> Option<&FieldRule> {
        self.fields.iter().find(|rule| rule.matches(tag))
    }

    pub fn match_self_closing_tag(&self, tag: &Tag) -> Option<&ImageRule> {
        self.images.iter().find(|rule| rule.matches(tag))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::allrecipes()
    }
}
