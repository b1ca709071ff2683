use std::sync::Arc;

use crate::error::ChannelError;
use crate::pty::queue::InterruptibleByteQueue;

/// Duplex byte stream handed to command implementations.
///
/// Terminal endpoints, in-memory pipe buffers and dispatcher-opened
/// redirection targets all look the same to a running command.
pub trait ByteStream: Send + Sync {
    /// Read into `buf`, returning the number of bytes copied.
    fn read(&self, buf: &mut [u8]) -> Result<usize, ChannelError>;

    /// Write all of `bytes`, returning how many were accepted.
    fn write(&self, bytes: &[u8]) -> Result<usize, ChannelError>;

    /// Tear the stream down; later reads and writes fail with `Closed`.
    fn close(&self);
}

/// Shared handle to any stream, as stored in pipeline stages.
pub type SharedStream = Arc<dyn ByteStream>;

/// In-memory pipe buffer connecting two pipeline stages.
///
/// The writing stage appends, the reading stage drains what has been written
/// so far. Reads never block.
#[derive(Debug, Default)]
pub struct MemoryStream {
    queue: InterruptibleByteQueue,
}

impl MemoryStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream pre-filled with `bytes`, handy as an external input.
    pub fn with_contents(bytes: &[u8]) -> Self {
        let stream = Self::new();
        // A fresh queue is never closed.
        let _ = stream.queue.write(bytes);
        stream
    }

    /// Drain everything currently buffered.
    pub fn take_contents(&self) -> Result<Vec<u8>, ChannelError> {
        let mut out = Vec::with_capacity(self.queue.len());
        let mut chunk = [0u8; 1024];
        loop {
            match self.queue.read(&mut chunk)? {
                0 => return Ok(out),
                n => out.extend_from_slice(&chunk[..n]),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl ByteStream for MemoryStream {
    fn read(&self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        self.queue.read(buf)
    }

    fn write(&self, bytes: &[u8]) -> Result<usize, ChannelError> {
        self.queue.write(bytes)
    }

    fn close(&self) {
        self.queue.close();
    }
}
