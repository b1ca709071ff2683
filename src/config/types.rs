use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellConfig {
    #[serde(default)]
    pub terminal: TerminalConfig,
    #[serde(default)]
    pub syntax: SyntaxConfig,
    #[serde(default)]
    pub paths: PathConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
}

/// Terminal channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Byte the controller translates into an interrupt (default: 0x03, ETX).
    #[serde(default = "default_interrupt_byte")]
    pub interrupt_byte: u8,
    /// Buffer size used when draining streams line by line (default: 4096).
    #[serde(default = "default_read_chunk_size")]
    pub read_chunk_size: usize,
}

/// Command-line grammar characters and operators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyntaxConfig {
    /// Escape character (default: `\`).
    #[serde(default = "default_escape_char")]
    pub escape_char: char,
    /// Quote character (default: `"`).
    #[serde(default = "default_quote_char")]
    pub quote_char: char,
    /// Pipe operator (default: `|`).
    #[serde(default = "default_pipe")]
    pub pipe: String,
    /// Input redirection operator (default: `<`).
    #[serde(default = "default_input")]
    pub input: String,
    /// Output redirection operator (default: `>`).
    #[serde(default = "default_output")]
    pub output: String,
    /// Append redirection operator (default: `>>`).
    #[serde(default = "default_append")]
    pub append: String,
}

/// Path helper settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Segment separator (default: `/`).
    #[serde(default = "default_separator")]
    pub separator: char,
}

/// Static tab-completion seed list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionConfig {
    #[serde(default)]
    pub candidates: Vec<String>,
}

fn default_interrupt_byte() -> u8 {
    crate::pty::INTERRUPT_BYTE
}

fn default_read_chunk_size() -> usize {
    4096
}

fn default_escape_char() -> char {
    '\\'
}

fn default_quote_char() -> char {
    '"'
}

fn default_pipe() -> String {
    "|".to_string()
}

fn default_input() -> String {
    "<".to_string()
}

fn default_output() -> String {
    ">".to_string()
}

fn default_append() -> String {
    ">>".to_string()
}

fn default_separator() -> char {
    '/'
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            interrupt_byte: default_interrupt_byte(),
            read_chunk_size: default_read_chunk_size(),
        }
    }
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            escape_char: default_escape_char(),
            quote_char: default_quote_char(),
            pipe: default_pipe(),
            input: default_input(),
            output: default_output(),
            append: default_append(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
        }
    }
}

impl SyntaxConfig {
    /// All operator strings, in the order they are checked for conflicts.
    pub fn operators(&self) -> [&str; 4] {
        [&self.pipe, &self.input, &self.output, &self.append]
    }

    pub fn is_operator(&self, token: &str) -> bool {
        self.operators().contains(&token)
    }
}
