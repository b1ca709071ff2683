//! Command-line front-end: tokenizer, redirection, pipeline wiring and completion.
//!
//! A raw line flows through the stages in order:
//! tokenize → extract redirection → split pipeline. [`ShellFrontend`] runs the
//! whole flow; the individual stages are exposed for dispatchers that need them.

mod completion;
mod frontend;
mod pipeline;
mod redirect;
mod tokenizer;

pub use completion::{complete, Completion, CompletionProvider, StaticCompletions};
pub use frontend::{CommandLine, ResourceOpener, ShellFrontend, SubmittedLine};
pub use pipeline::{split_pipeline, PipelineSplitter, PipelineStage};
pub use redirect::{extract_redirection, RedirectMode, RedirectionExtractor, RedirectionSpec};
pub use tokenizer::{tokenize, Tokenizer};
