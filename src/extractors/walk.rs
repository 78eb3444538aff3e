use log::warn;

use super::{normalize_text, write_field, CaptureObserver, Field, RuleSet, WriteOutcome};
use crate::error::ExtractionError;
use crate::markup::{Tag, Token, TokenSource};
use crate::model::Recipe;

const TEXT_CONTENT: &str = "text content";

/// Position of the walk relative to the footnote section
#[derive(Debug)]
enum FootnoteState {
    ScanningForFootnoteHeader,
    /// A header was captured; waiting for the list item that completes it
    ScanningForListItem { header: String },
}

/// Single pass over a token source, filling in a [`Recipe`].
///
/// Every matched field rule consumes exactly one token of lookahead, which must be
/// text. A footnote header switches the walk into [`FootnoteState::ScanningForListItem`]
/// until the first list item after it has been captured.
pub struct FieldWalker<'a, S> {
    source: S,
    rules: &'a RuleSet,
    observer: &'a dyn CaptureObserver,
    recipe: Recipe,
    state: FootnoteState,
}

impl<'a, S: TokenSource> FieldWalker<'a, S> {
    pub fn new(
        source: S,
        recipe: Recipe,
        rules: &'a RuleSet,
        observer: &'a dyn CaptureObserver,
    ) -> Self {
        Self {
            source,
            rules,
            observer,
            recipe,
            state: FootnoteState::ScanningForFootnoteHeader,
        }
    }

    /// Consume tokens until the end of the stream or the first failure.
    pub fn run(mut self) -> Result<Recipe, ExtractionError> {
        loop {
            let token = self.source.next_token();
            let state =
                std::mem::replace(&mut self.state, FootnoteState::ScanningForFootnoteHeader);

            self.state = match state {
                FootnoteState::ScanningForFootnoteHeader => match token {
                    Token::EndOfStream => return Ok(self.recipe),
                    Token::Malformed(source) => {
                        return Err(ExtractionError::MalformedMarkup {
                            field: None,
                            source,
                        })
                    }
                    Token::StartTag(tag) => self.on_start_tag(&tag)?,
                    Token::SelfClosingTag(tag) => {
                        self.on_self_closing_tag(&tag);
                        FootnoteState::ScanningForFootnoteHeader
                    }
                    _ => FootnoteState::ScanningForFootnoteHeader,
                },
                FootnoteState::ScanningForListItem { header } => match token {
                    Token::StartTag(tag) if tag.name == self.rules.footnote_item_tag => {
                        let text = self.expect_text(Field::Footnote)?;
                        self.capture(Field::Footnote, format!("{header} {text}"));
                        FootnoteState::ScanningForFootnoteHeader
                    }
                    Token::EndOfStream => {
                        return Err(ExtractionError::UnexpectedToken {
                            field: Field::Footnote,
                            expected: "a list item",
                            found: Token::EndOfStream.describe(),
                        })
                    }
                    Token::Malformed(source) => {
                        return Err(ExtractionError::MalformedMarkup {
                            field: Some(Field::Footnote),
                            source,
                        })
                    }
                    _ => FootnoteState::ScanningForListItem { header },
                },
            };
        }
    }

    fn on_start_tag(&mut self, tag: &Tag) -> Result<FootnoteState, ExtractionError> {
        let Some(field) = self.rules.match_start_tag(tag).map(|rule| rule.field) else {
            return Ok(FootnoteState::ScanningForFootnoteHeader);
        };

        let text = self.expect_text(field)?;
        if field == Field::FootnoteHeader {
            self.observer.captured(field, &text);
            return Ok(FootnoteState::ScanningForListItem { header: text });
        }

        self.capture(field, text);
        Ok(FootnoteState::ScanningForFootnoteHeader)
    }

    fn on_self_closing_tag(&mut self, tag: &Tag) {
        let rules = self.rules;
        let Some(rule) = rules.match_self_closing_tag(tag) else {
            return;
        };

        match rule.value(tag) {
            Some(value) => self.capture(Field::Image, value.to_string()),
            None => warn!(
                "{} tag on {} has no {:?} attribute; leaving it unset",
                Field::Image,
                self.recipe.source_url,
                rule.value_attribute
            ),
        }
    }

    /// Read the lookahead token that must carry the text of `field`.
    fn expect_text(&mut self, field: Field) -> Result<String, ExtractionError> {
        match self.source.next_token() {
            Token::Text(raw) => Ok(normalize_text(&raw)),
            Token::Malformed(source) => Err(ExtractionError::MalformedMarkup {
                field: Some(field),
                source,
            }),
            other => Err(ExtractionError::UnexpectedToken {
                field,
                expected: TEXT_CONTENT,
                found: other.describe(),
            }),
        }
    }

    fn capture(&mut self, field: Field, value: String) {
        if write_field(&mut self.recipe, field, value.clone()) == WriteOutcome::Written {
            self.observer.captured(field, &value);
        }
    }
}

/// Walk `source` to completion, filling in `recipe`.
pub fn extract_recipe<S: TokenSource>(
    source: S,
    recipe: Recipe,
    rules: &RuleSet,
    observer: &dyn CaptureObserver,
) -> Result<Recipe, ExtractionError> {
    FieldWalker::new(source, recipe, rules, observer).run()
}
