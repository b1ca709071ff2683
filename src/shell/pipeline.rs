//! Pipeline splitter: token list → ordered stages wired by byte streams.

use std::fmt;
use std::sync::Arc;

use crate::config::SyntaxConfig;
use crate::error::ParseError;
use crate::pty::{MemoryStream, SharedStream};

/// One command invocation inside a pipeline.
#[derive(Clone)]
pub struct PipelineStage {
    /// Command name followed by its arguments.
    pub tokens: Vec<String>,
    /// Previous stage's output, or the external input for the first stage.
    pub input: SharedStream,
    /// Next stage's input, or the external output for the last stage.
    pub output: SharedStream,
}

impl PipelineStage {
    pub fn command(&self) -> &str {
        self.tokens.first().map(String::as_str).unwrap_or_default()
    }

    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }
}

impl fmt::Debug for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineStage")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

/// Cuts a token list at pipe operators.
#[derive(Debug, Clone)]
pub struct PipelineSplitter {
    pipe: String,
}

impl Default for PipelineSplitter {
    fn default() -> Self {
        Self::new(&SyntaxConfig::default())
    }
}

impl PipelineSplitter {
    pub fn new(syntax: &SyntaxConfig) -> Self {
        Self {
            pipe: syntax.pipe.clone(),
        }
    }

    /// Group tokens into per-stage slices, rejecting empty segments.
    pub fn segments(&self, tokens: Vec<String>) -> Result<Vec<Vec<String>>, ParseError> {
        let mut segments = Vec::new();
        if tokens.is_empty() {
            return Ok(segments);
        }

        let mut current = Vec::new();
        for token in tokens {
            if token == self.pipe {
                if current.is_empty() {
                    return Err(ParseError::EmptyPipelineStage {
                        index: segments.len(),
                    });
                }
                segments.push(std::mem::take(&mut current));
            } else {
                current.push(token);
            }
        }

        // The end of the line acts as a final pipe operator.
        if current.is_empty() {
            return Err(ParseError::EmptyPipelineStage {
                index: segments.len(),
            });
        }
        segments.push(current);
        Ok(segments)
    }

    /// Build the stage chain. Nothing is allocated when the tokens are rejected.
    pub fn split(
        &self,
        tokens: Vec<String>,
        input: SharedStream,
        output: SharedStream,
    ) -> Result<Vec<PipelineStage>, ParseError> {
        let segments = self.segments(tokens)?;
        Ok(self.wire(segments, input, output))
    }

    /// Connect already validated segments.
    ///
    /// Stage 0 reads `input`, the last stage writes `output`, and every pair
    /// of neighbours shares a fresh [`MemoryStream`].
    pub fn wire(
        &self,
        segments: Vec<Vec<String>>,
        input: SharedStream,
        output: SharedStream,
    ) -> Vec<PipelineStage> {
        let last = segments.len().saturating_sub(1);

        let mut stages = Vec::with_capacity(segments.len());
        let mut reader = input;
        for (index, tokens) in segments.into_iter().enumerate() {
            let writer: SharedStream = if index == last {
                Arc::clone(&output)
            } else {
                Arc::new(MemoryStream::new())
            };
            stages.push(PipelineStage {
                tokens,
                input: reader,
                output: Arc::clone(&writer),
            });
            reader = writer;
        }

        tracing::trace!(stages = stages.len(), "pipeline wired");
        stages
    }
}

/// Split with the default `|` operator.
pub fn split_pipeline(
    tokens: Vec<String>,
    input: SharedStream,
    output: SharedStream,
) -> Result<Vec<PipelineStage>, ParseError> {
    PipelineSplitter::default().split(tokens, input, output)
}
