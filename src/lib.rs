//! Simulated pseudo-terminal and shell front-end.
//!
//! - [`pty`]: interruptible byte queues and the controller/peripheral pair.
//! - [`shell`]: tokenizer, redirection, pipeline splitting and completion.
//! - [`path`]: path normalization helpers for command implementations.

pub mod config;
pub mod error;
pub mod logging;
pub mod path;
pub mod pty;
pub mod shell;

pub use error::{ChannelError, ParseError, PathError, ShellError};
