use std::io::Read;

use html5gum::{DefaultEmitter, IoReader, Tokenizer};
use log::trace;

use super::{Attribute, MarkupError, Tag, Token, TokenSource};

type RawTokens<'r> = Box<dyn Iterator<Item = Result<html5gum::Token, std::io::Error>> + 'r>;

/// Token source over an HTML byte stream.
///
/// Tag and attribute names come out lowercased, as the HTML tokenizer produces them.
/// The contents of raw-text elements (`script`, `style`, `textarea`, `title`, ...) come
/// out as a single text token, never as tags. Recoverable HTML parse errors are
/// skipped; only a failure to read the underlying stream is reported as
/// [`Token::Malformed`].
pub struct HtmlTokenSource<'r> {
    tokens: RawTokens<'r>,
    finished: bool,
}

impl<'r> HtmlTokenSource<'r> {
    pub fn new<R: Read + 'r>(reader: R) -> Self {
        let mut emitter = DefaultEmitter::default();
        emitter.switch_states(true);

        Self {
            tokens: Box::new(Tokenizer::new_with_emitter(IoReader::new(reader), emitter)),
            finished: false,
        }
    }
}

impl TokenSource for HtmlTokenSource<'_> {
    fn next_token(&mut self) -> Token {
        if self.finished {
            return Token::EndOfStream;
        }

        loop {
            let raw = match self.tokens.next() {
                None => {
                    self.finished = true;
                    return Token::EndOfStream;
                }
                Some(Err(err)) => {
                    self.finished = true;
                    return Token::Malformed(MarkupError::Read(err));
                }
                Some(Ok(raw)) => raw,
            };

            match raw {
                html5gum::Token::StartTag(tag) => {
                    let converted = Tag {
                        name: lossy(&tag.name),
                        attributes: tag
                            .attributes
                            .iter()
                            .map(|(key, value)| Attribute::new(lossy(key), lossy(value)))
                            .collect(),
                    };
                    return if tag.self_closing {
                        Token::SelfClosingTag(converted)
                    } else {
                        Token::StartTag(converted)
                    };
                }
                html5gum::Token::EndTag(tag) => return Token::EndTag(lossy(&tag.name)),
                html5gum::Token::String(text) => return Token::Text(lossy(&text)),
                html5gum::Token::Comment(text) => return Token::Comment(lossy(&text)),
                html5gum::Token::Error(err) => {
                    trace!("Skipping recoverable HTML parse error: {:?}", err);
                }
                _ => return Token::Doctype,
            }
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
