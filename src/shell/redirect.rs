//! Redirection extractor: splits a trailing `<`, `>` or `>>` clause off a token list.

use crate::config::SyntaxConfig;
use crate::error::ParseError;

/// How a redirection target is attached to the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectMode {
    /// Replace the first stage's input.
    Input,
    /// Truncate and replace the last stage's output.
    Output,
    /// Append the last stage's output.
    Append,
}

/// Redirection clause found on a command line, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RedirectionSpec {
    #[default]
    None,
    Input(String),
    Output(String),
    Append(String),
}

impl RedirectionSpec {
    fn new(mode: RedirectMode, target: String) -> Self {
        match mode {
            RedirectMode::Input => RedirectionSpec::Input(target),
            RedirectMode::Output => RedirectionSpec::Output(target),
            RedirectMode::Append => RedirectionSpec::Append(target),
        }
    }

    pub fn mode(&self) -> Option<RedirectMode> {
        match self {
            RedirectionSpec::None => None,
            RedirectionSpec::Input(_) => Some(RedirectMode::Input),
            RedirectionSpec::Output(_) => Some(RedirectMode::Output),
            RedirectionSpec::Append(_) => Some(RedirectMode::Append),
        }
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            RedirectionSpec::None => None,
            RedirectionSpec::Input(path)
            | RedirectionSpec::Output(path)
            | RedirectionSpec::Append(path) => Some(path),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, RedirectionSpec::None)
    }
}

/// Finds the first redirection operator in a token list.
#[derive(Debug, Clone)]
pub struct RedirectionExtractor {
    syntax: SyntaxConfig,
}

impl Default for RedirectionExtractor {
    fn default() -> Self {
        Self::new(SyntaxConfig::default())
    }
}

impl RedirectionExtractor {
    pub fn new(syntax: SyntaxConfig) -> Self {
        Self { syntax }
    }

    fn mode_of(&self, token: &str) -> Option<RedirectMode> {
        if token == self.syntax.input {
            Some(RedirectMode::Input)
        } else if token == self.syntax.output {
            Some(RedirectMode::Output)
        } else if token == self.syntax.append {
            Some(RedirectMode::Append)
        } else {
            None
        }
    }

    /// Remove the redirection clause and everything after it.
    ///
    /// The target is the rest of the line joined with single spaces, so it may
    /// contain whitespace but no further operators. Only the first operator
    /// is considered.
    pub fn extract(
        &self,
        mut tokens: Vec<String>,
    ) -> Result<(Vec<String>, RedirectionSpec), ParseError> {
        let Some((index, mode)) = tokens
            .iter()
            .enumerate()
            .find_map(|(i, t)| self.mode_of(t).map(|mode| (i, mode)))
        else {
            return Ok((tokens, RedirectionSpec::None));
        };

        let mut clause = tokens.split_off(index);
        let operator = clause.remove(0);
        if clause.is_empty() {
            return Err(ParseError::MissingRedirectionTarget { operator });
        }
        if let Some(extra) = clause.iter().find(|t| self.syntax.is_operator(t)) {
            return Err(ParseError::AmbiguousRedirection {
                operator: extra.clone(),
            });
        }

        let target = clause.join(" ");
        tracing::trace!(?mode, %target, "redirection extracted");
        Ok((tokens, RedirectionSpec::new(mode, target)))
    }
}

/// Extract a redirection using the default operators.
pub fn extract_redirection(
    tokens: Vec<String>,
) -> Result<(Vec<String>, RedirectionSpec), ParseError> {
    RedirectionExtractor::default().extract(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn output_redirection() {
        let (rest, spec) = extract_redirection(toks(&["cat", "f", ">", "out.txt"])).unwrap();
        assert_eq!(rest, toks(&["cat", "f"]));
        assert_eq!(spec, RedirectionSpec::Output("out.txt".to_string()));
        assert_eq!(spec.mode(), Some(RedirectMode::Output));
    }

    #[test]
    fn append_and_input_redirection() {
        let (_, spec) = extract_redirection(toks(&["echo", "hi", ">>", "log"])).unwrap();
        assert_eq!(spec, RedirectionSpec::Append("log".to_string()));

        let (rest, spec) = extract_redirection(toks(&["sort", "<", "in"])).unwrap();
        assert_eq!(rest, toks(&["sort"]));
        assert_eq!(spec.target(), Some("in"));
    }

    #[test]
    fn target_tokens_are_rejoined() {
        let (_, spec) = extract_redirection(toks(&["ls", ">", "my", "file.txt"])).unwrap();
        assert_eq!(spec, RedirectionSpec::Output("my file.txt".to_string()));
    }

    #[test]
    fn no_operator_leaves_tokens_alone() {
        let (rest, spec) = extract_redirection(toks(&["ls", "-l"])).unwrap();
        assert_eq!(rest, toks(&["ls", "-l"]));
        assert!(spec.is_none());
        assert_eq!(spec.target(), None);
    }

    #[test]
    fn trailing_operator_is_missing_target() {
        assert_eq!(
            extract_redirection(toks(&["cat", ">"])),
            Err(ParseError::MissingRedirectionTarget {
                operator: ">".to_string()
            })
        );
    }

    #[test]
    fn operator_in_target_is_ambiguous() {
        assert_eq!(
            extract_redirection(toks(&["cat", "<", "in", ">", "out"])),
            Err(ParseError::AmbiguousRedirection {
                operator: ">".to_string()
            })
        );
    }
}
