//! Tokenizer for tagged templates
//!
//! Splits a template string into literal runs, tag markers, and placeholder
//! markers. The delimiter characters come from a runtime [`Syntax`] record
//! rather than being baked into the scanner, so hosts can retarget the
//! grammar (e.g. `$name$` placeholders instead of `%name%`) per call.

use serde::Deserialize;

use crate::error::{ParseError, Span};
use crate::parser::ast::Spanned;

/// Token kinds produced by the tokenizer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Run of literal text, escapes already processed
    Literal(String),
    /// Opening tag such as `<b>` or `<color:red>`
    TagOpen { name: String, args: Vec<String> },
    /// Closing tag such as `</b>`
    TagClose { name: String },
    /// Placeholder such as `%name%`
    Placeholder { name: String },
}

/// Delimiter grammar for templates
///
/// Deserializable from TOML (each field a one-character string), with the
/// conventional `<tag>`/`%placeholder%` grammar as the default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Syntax {
    /// Starts a tag (`<`)
    pub tag_open: char,
    /// Ends a tag (`>`)
    pub tag_close: char,
    /// Marks a closing tag directly after `tag_open` (`/`)
    pub close_marker: char,
    /// Separates a tag name from its arguments (`:`)
    pub arg_separator: char,
    /// Delimits a placeholder on both sides (`%`)
    pub placeholder: char,
    /// Makes the following delimiter character literal (`\`)
    pub escape: char,
}

impl Default for Syntax {
    fn default() -> Self {
        Self {
            tag_open: '<',
            tag_close: '>',
            close_marker: '/',
            arg_separator: ':',
            placeholder: '%',
            escape: '\\',
        }
    }
}

impl Syntax {
    /// True for characters the escape character can make literal
    pub fn is_escapable(&self, c: char) -> bool {
        c == self.tag_open
            || c == self.tag_close
            || c == self.placeholder
            || c == self.escape
    }
}

/// True for characters allowed in tag and placeholder names
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Lazy token stream over a template
///
/// Yields `Err` once on the first lexical failure and then fuses. Restarting
/// is re-calling [`tokenize`]; scanning the same input twice yields the same
/// sequence.
pub struct Tokens<'a> {
    source: &'a str,
    syntax: &'a Syntax,
    pos: usize,
    failed: bool,
}

/// Tokenize a template under the given syntax
pub fn tokenize<'a>(source: &'a str, syntax: &'a Syntax) -> Tokens<'a> {
    Tokens {
        source,
        syntax,
        pos: 0,
        failed: false,
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Spanned<Token>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.source.len() {
            return None;
        }

        let start = self.pos;
        let first = self.source[start..]
            .chars()
            .next()
            .expect("pos is on a char boundary before end of input");

        let result = if first == self.syntax.tag_open {
            self.lex_tag(start)
        } else if first == self.syntax.placeholder {
            self.lex_placeholder(start)
        } else {
            self.lex_literal(start)
        };

        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

impl<'a> Tokens<'a> {
    fn lex_literal(&mut self, start: usize) -> Result<Spanned<Token>, ParseError> {
        let mut text = String::new();
        let mut iter = self.source[start..].char_indices();

        while let Some((i, c)) = iter.next() {
            if c == self.syntax.tag_open || c == self.syntax.placeholder {
                self.pos = start + i;
                return Ok(Spanned::new(Token::Literal(text), start..self.pos));
            }
            if c == self.syntax.escape {
                match iter.next() {
                    Some((_, next)) if self.syntax.is_escapable(next) => text.push(next),
                    Some((_, next)) => {
                        // not an escape sequence, keep both characters
                        text.push(c);
                        text.push(next);
                    }
                    None => text.push(c),
                }
            } else {
                text.push(c);
            }
        }

        self.pos = self.source.len();
        Ok(Spanned::new(Token::Literal(text), start..self.pos))
    }

    fn lex_tag(&mut self, start: usize) -> Result<Spanned<Token>, ParseError> {
        let body_start = start + self.syntax.tag_open.len_utf8();
        let rel = match self.source[body_start..].find(self.syntax.tag_close) {
            Some(rel) => rel,
            None => {
                return Err(ParseError::MalformedTag {
                    span: start..self.source.len(),
                    message: "tag is opened but never closed".to_string(),
                })
            }
        };

        let body = &self.source[body_start..body_start + rel];
        let end = body_start + rel + self.syntax.tag_close.len_utf8();
        let span: Span = start..end;
        self.pos = end;

        let (closing, body) = match body.strip_prefix(self.syntax.close_marker) {
            Some(rest) => (true, rest),
            None => (false, body),
        };

        let mut parts = body.split(self.syntax.arg_separator);
        let name = parts.next().unwrap_or("").to_string();
        let args: Vec<String> = parts.map(str::to_string).collect();

        if name.is_empty() {
            return Err(ParseError::MalformedTag {
                span,
                message: "empty tag name".to_string(),
            });
        }
        if !name.chars().all(is_name_char) {
            return Err(ParseError::MalformedTag {
                span,
                message: format!("invalid character in tag name '{}'", name),
            });
        }
        if closing && !args.is_empty() {
            return Err(ParseError::MalformedTag {
                span,
                message: format!("closing tag '{}' cannot carry arguments", name),
            });
        }

        let token = if closing {
            Token::TagClose { name }
        } else {
            Token::TagOpen { name, args }
        };
        Ok(Spanned::new(token, span))
    }

    fn lex_placeholder(&mut self, start: usize) -> Result<Spanned<Token>, ParseError> {
        let body_start = start + self.syntax.placeholder.len_utf8();
        let rel = match self.source[body_start..].find(self.syntax.placeholder) {
            Some(rel) => rel,
            None => {
                return Err(ParseError::MalformedTag {
                    span: start..self.source.len(),
                    message: "placeholder is opened but never closed".to_string(),
                })
            }
        };

        let name = &self.source[body_start..body_start + rel];
        let end = body_start + rel + self.syntax.placeholder.len_utf8();
        let span: Span = start..end;
        self.pos = end;

        if name.is_empty() {
            return Err(ParseError::MalformedTag {
                span,
                message: "empty placeholder name".to_string(),
            });
        }
        if !name.chars().all(is_name_char) {
            return Err(ParseError::MalformedTag {
                span,
                message: format!("invalid character in placeholder name '{}'", name),
            });
        }

        Ok(Spanned::new(
            Token::Placeholder {
                name: name.to_string(),
            },
            span,
        ))
    }
}
