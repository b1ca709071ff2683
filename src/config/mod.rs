mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{CompletionConfig, PathConfig, ShellConfig, SyntaxConfig, TerminalConfig};
