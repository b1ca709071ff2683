//! Error types shared by the terminal channel and the shell front-end.
//!
//! Channel errors come out of the byte queues and endpoints; parse errors come
//! out of the tokenizer, redirection extractor and pipeline splitter. Neither
//! kind leaves shared state half-updated, so the caller can keep using the
//! channel or submit another line after any of them.

use thiserror::Error;

/// Failures of a read or write on a terminal channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// The channel was torn down. Fatal to the call, never retried internally.
    #[error("channel closed")]
    Closed,

    /// A pending interrupt was consumed by this read.
    #[error("read interrupted")]
    Interrupted,
}

/// Failures while turning a raw command line into pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line is not a complete, well-formed command line.
    #[error("malformed input at offset {position}: {reason}")]
    MalformedInput {
        position: usize,
        reason: &'static str,
    },

    /// A redirection operator was the last token on the line.
    #[error("missing target after '{operator}'")]
    MissingRedirectionTarget { operator: String },

    /// A redirection target contained another shell operator.
    #[error("unexpected '{operator}' in redirection target")]
    AmbiguousRedirection { operator: String },

    /// A pipeline segment had no command in it.
    #[error("empty command in pipeline stage {index}")]
    EmptyPipelineStage { index: usize },
}

/// Failures of the path helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("malformed path '{path}'")]
    MalformedPath { path: String },
}

/// Everything the shell front-end can report for one submitted line.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Path(#[from] PathError),

    /// The dispatcher-supplied opener could not provide a redirection stream.
    #[error("cannot open '{path}': {reason}")]
    Open { path: String, reason: String },
}

impl ShellError {
    /// True for errors caused by what the user typed, as opposed to the channel.
    pub fn is_user_error(&self) -> bool {
        matches!(self, ShellError::Parse(_) | ShellError::Path(_))
    }
}
