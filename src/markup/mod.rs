//! Markup tokens and the sources that produce them.
//!
//! A [`TokenSource`] is forward-only: once it has returned [`Token::EndOfStream`] or
//! [`Token::Malformed`] it keeps returning [`Token::EndOfStream`].

pub mod attributes;
mod html;

use std::collections::VecDeque;
use std::fmt;

use thiserror::Error;

pub use attributes::{attribute_value, has_attribute};
pub use html::HtmlTokenSource;

/// Cause attached to a malformed-markup signal
#[derive(Error, Debug)]
pub enum MarkupError {
    /// The underlying byte stream could not be read
    #[error("failed to read markup: {0}")]
    Read(#[from] std::io::Error),
}

/// A single `key="value"` pair on a tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub key: String,
    pub value: String,
}

impl Attribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A start or self-closing tag with its attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(key, value));
        self
    }
}

#[derive(Debug)]
pub enum Token {
    StartTag(Tag),
    SelfClosingTag(Tag),
    EndTag(String),
    Text(String),
    Comment(String),
    Doctype,
    EndOfStream,
    Malformed(MarkupError),
}

impl Token {
    /// Short human readable description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Token::StartTag(tag) => format!("start tag <{}>", tag.name),
            Token::SelfClosingTag(tag) => format!("self-closing tag <{} />", tag.name),
            Token::EndTag(name) => format!("end tag </{}>", name),
            Token::Text(_) => "text".to_string(),
            Token::Comment(_) => "comment".to_string(),
            Token::Doctype => "doctype".to_string(),
            Token::EndOfStream => "end of stream".to_string(),
            Token::Malformed(err) => format!("malformed markup ({})", err),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Lazy, forward-only producer of markup tokens
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

/// Token source backed by an in-memory queue of already produced tokens.
///
/// Yields [`Token::EndOfStream`] once the queue is drained.
#[derive(Debug, Default)]
pub struct TokenQueue {
    tokens: VecDeque<Token>,
    finished: bool,
}

impl TokenQueue {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        Self {
            tokens: tokens.into_iter().collect(),
            finished: false,
        }
    }
}

impl TokenSource for TokenQueue {
    fn next_token(&mut self) -> Token {
        if self.finished {
            return Token::EndOfStream;
        }
        match self.tokens.pop_front() {
            Some(token) => {
                if matches!(token, Token::EndOfStream | Token::Malformed(_)) {
                    self.finished = true;
                }
                token
            }
            None => {
                self.finished = true;
                Token::EndOfStream
            }
        }
    }
}
