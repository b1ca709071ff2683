use crate::error::ChannelError;
use crate::pty::stream::ByteStream;

const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Splits a byte stream into newline-terminated lines.
///
/// Works on blocking and polling streams alike: with a polling stream,
/// `Ok(None)` means no complete line is available yet.
pub struct LineReader<S> {
    stream: S,
    pending: Vec<u8>,
    chunk_size: usize,
}

impl<S: ByteStream> LineReader<S> {
    pub fn new(stream: S) -> Self {
        Self::with_chunk_size(stream, DEFAULT_CHUNK_SIZE)
    }

    pub fn with_chunk_size(stream: S, chunk_size: usize) -> Self {
        Self {
            stream,
            pending: Vec::new(),
            chunk_size: chunk_size.max(1),
        }
    }

    /// Next line without its `\n` or `\r\n` terminator.
    ///
    /// An interrupt discards the partially typed line. When the stream closes
    /// with bytes still buffered, they are returned as a final line and the
    /// following call reports `Closed`.
    pub fn read_line(&mut self) -> Result<Option<String>, ChannelError> {
        let mut chunk = vec![0u8; self.chunk_size];
        loop {
            if let Some(line) = self.take_line() {
                return Ok(Some(line));
            }

            match self.stream.read(&mut chunk) {
                Ok(0) => return Ok(None),
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(ChannelError::Interrupted) => {
                    self.pending.clear();
                    return Err(ChannelError::Interrupted);
                }
                Err(ChannelError::Closed) if !self.pending.is_empty() => {
                    let rest = std::mem::take(&mut self.pending);
                    return Ok(Some(decode(&rest)));
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Bytes received but not yet returned as part of a line.
    pub fn buffered(&self) -> &[u8] {
        &self.pending
    }

    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    pub fn into_inner(self) -> S {
        self.stream
    }

    fn take_line(&mut self) -> Option<String> {
        let end = self.pending.iter().position(|&b| b == b'\n')?;
        let mut line: Vec<u8> = self.pending.drain(..=end).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(decode(&line))
    }
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
