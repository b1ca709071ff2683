//! Shell front-end: one submitted line → dispatch-ready pipeline stages.

use std::io;
use std::sync::Arc;

use crate::config::ShellConfig;
use crate::error::{ParseError, ShellError};
use crate::pty::SharedStream;
use crate::shell::completion::{complete, Completion, CompletionProvider, StaticCompletions};
use crate::shell::pipeline::{PipelineSplitter, PipelineStage};
use crate::shell::redirect::{RedirectMode, RedirectionExtractor, RedirectionSpec};
use crate::shell::tokenizer::Tokenizer;

/// Opens redirection targets on behalf of the front-end.
///
/// Implemented by the dispatcher; the front-end never touches a filesystem.
pub trait ResourceOpener: Send + Sync {
    fn open(&self, path: &str, mode: RedirectMode) -> io::Result<SharedStream>;
}

/// Tokens and redirection of a line, before any streams are attached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    pub tokens: Vec<String>,
    pub redirection: RedirectionSpec,
}

/// A fully wired line.
#[derive(Debug, Clone)]
pub struct SubmittedLine {
    pub stages: Vec<PipelineStage>,
    /// The redirection clause, whether or not an opener already applied it.
    pub redirection: RedirectionSpec,
    /// True when a configured opener replaced one of the external streams.
    pub redirection_applied: bool,
}

pub struct ShellFrontend {
    tokenizer: Tokenizer,
    redirects: RedirectionExtractor,
    splitter: PipelineSplitter,
    completions: Arc<dyn CompletionProvider>,
    opener: Option<Arc<dyn ResourceOpener>>,
}

impl ShellFrontend {
    pub fn new(config: &ShellConfig, completions: Arc<dyn CompletionProvider>) -> Self {
        Self {
            tokenizer: Tokenizer::new(&config.syntax),
            redirects: RedirectionExtractor::new(config.syntax.clone()),
            splitter: PipelineSplitter::new(&config.syntax),
            completions,
            opener: None,
        }
    }

    /// Front-end whose completions are the config's static seed list.
    pub fn from_config(config: &ShellConfig) -> Self {
        let completions = StaticCompletions::new(config.completion.candidates.clone());
        Self::new(config, Arc::new(completions))
    }

    pub fn with_opener(mut self, opener: Arc<dyn ResourceOpener>) -> Self {
        self.opener = Some(opener);
        self
    }

    /// Tokenize and extract the redirection clause.
    pub fn parse(&self, line: &str) -> Result<CommandLine, ShellError> {
        let tokens = self.tokenizer.tokenize(line)?;
        let (tokens, redirection) = self.redirects.extract(tokens)?;
        Ok(CommandLine {
            tokens,
            redirection,
        })
    }

    /// Parse `line` and wire its stages between `input` and `output`.
    ///
    /// A blank line yields no stages. When an opener is configured, a `<`
    /// target replaces `input` and a `>`/`>>` target replaces `output`.
    pub fn submit_line(
        &self,
        line: &str,
        input: SharedStream,
        output: SharedStream,
    ) -> Result<SubmittedLine, ShellError> {
        let CommandLine {
            tokens,
            redirection,
        } = self.parse(line)?;

        if tokens.is_empty() && !redirection.is_none() {
            return Err(ParseError::EmptyPipelineStage { index: 0 }.into());
        }
        let segments = self.splitter.segments(tokens)?;

        let (input, output, redirection_applied) =
            self.apply_redirection(&redirection, input, output)?;
        let stages = self.splitter.wire(segments, input, output);

        tracing::debug!(
            stages = stages.len(),
            redirection = ?redirection,
            "line submitted"
        );
        Ok(SubmittedLine {
            stages,
            redirection,
            redirection_applied,
        })
    }

    /// Same as [`submit_line`](Self::submit_line), keeping only the stages.
    pub fn submit(
        &self,
        line: &str,
        input: SharedStream,
        output: SharedStream,
    ) -> Result<Vec<PipelineStage>, ShellError> {
        self.submit_line(line, input, output).map(|line| line.stages)
    }

    /// Current completion candidates, straight from the dispatcher.
    pub fn completions(&self) -> Vec<String> {
        self.completions.candidates()
    }

    pub fn complete(&self, prefix: &str) -> Completion {
        complete(self.completions.as_ref(), prefix)
    }

    fn apply_redirection(
        &self,
        redirection: &RedirectionSpec,
        input: SharedStream,
        output: SharedStream,
    ) -> Result<(SharedStream, SharedStream, bool), ShellError> {
        let (Some(opener), Some(mode), Some(path)) =
            (&self.opener, redirection.mode(), redirection.target())
        else {
            return Ok((input, output, false));
        };

        let stream = opener.open(path, mode).map_err(|e| ShellError::Open {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

        Ok(match mode {
            RedirectMode::Input => (stream, output, true),
            RedirectMode::Output | RedirectMode::Append => (input, stream, true),
        })
    }
}
