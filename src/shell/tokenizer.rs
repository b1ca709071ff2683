//! Tokenizer: raw command line → ordered word tokens.

use crate::config::SyntaxConfig;
use crate::error::ParseError;

/// Splits command lines into words, honouring quotes and escapes.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    escape: char,
    quote: char,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(&SyntaxConfig::default())
    }
}

impl Tokenizer {
    pub fn new(syntax: &SyntaxConfig) -> Self {
        Self {
            escape: syntax.escape_char,
            quote: syntax.quote_char,
        }
    }

    /// Tokenize one complete line.
    ///
    /// - `\r`, `\t`, `\n` after the escape character map to CR, tab and LF;
    ///   any other escaped character (including the escape itself) is literal.
    /// - Quotes toggle a region where whitespace is kept; a closing quote
    ///   directly followed by another quote is rejected.
    /// - Unquoted whitespace separates words; empty words are never emitted.
    /// - A dangling escape or unterminated quote fails the whole line.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>, ParseError> {
        let mut tokens = Vec::new();
        let mut word = String::new();
        let mut escaping = false;
        let mut quote_start: Option<usize> = None;
        let mut chars = text.char_indices().peekable();

        while let Some((pos, ch)) = chars.next() {
            if escaping {
                word.push(match ch {
                    'r' => '\r',
                    't' => '\t',
                    'n' => '\n',
                    other => other,
                });
                escaping = false;
                continue;
            }

            if ch == self.escape {
                escaping = true;
                continue;
            }

            if ch == self.quote {
                if quote_start.take().is_some() {
                    if let Some(&(next_pos, next)) = chars.peek() {
                        if next == self.quote {
                            return Err(ParseError::MalformedInput {
                                position: next_pos,
                                reason: "quote directly follows a closing quote",
                            });
                        }
                    }
                } else {
                    quote_start = Some(pos);
                }
                continue;
            }

            if ch.is_whitespace() && quote_start.is_none() {
                if !word.is_empty() {
                    tokens.push(std::mem::take(&mut word));
                }
                continue;
            }

            word.push(ch);
        }

        if escaping {
            return Err(ParseError::MalformedInput {
                position: text.len(),
                reason: "line ends with an escape character",
            });
        }
        if let Some(position) = quote_start {
            return Err(ParseError::MalformedInput {
                position,
                reason: "unterminated quote",
            });
        }

        if !word.is_empty() {
            tokens.push(word);
        }
        Ok(tokens)
    }
}

/// Tokenize with the default grammar.
pub fn tokenize(text: &str) -> Result<Vec<String>, ParseError> {
    Tokenizer::default().tokenize(text)
}
