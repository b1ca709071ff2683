//! Interruptible FIFO byte queue.
//!
//! One mutex guards the pending bytes, the interrupt flag and the closed flag
//! together. The condition variable is notified on every mutation that can
//! unblock a reader (write, interrupt, close), and blocked readers re-check
//! the state in a loop after each wake.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::error::ChannelError;

#[derive(Debug, Default)]
struct QueueState {
    bytes: VecDeque<u8>,
    interrupted: bool,
    closed: bool,
}

impl QueueState {
    /// Non-blocking dequeue. Data always wins over a pending interrupt: the
    /// flag is only consumed by a read that finds nothing to return.
    fn try_read(&mut self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        if self.closed {
            return Err(ChannelError::Closed);
        }

        let count = buf.len().min(self.bytes.len());
        for (slot, byte) in buf.iter_mut().zip(self.bytes.drain(..count)) {
            *slot = byte;
        }

        if count == 0 && self.bytes.is_empty() && self.interrupted {
            self.interrupted = false;
            return Err(ChannelError::Interrupted);
        }

        Ok(count)
    }
}

/// Unbounded FIFO of bytes with an out-of-band interrupt flag.
#[derive(Debug, Default)]
pub struct InterruptibleByteQueue {
    state: Mutex<QueueState>,
    readable: Condvar,
}

impl InterruptibleByteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append bytes to the tail. Never blocks.
    pub fn write(&self, bytes: &[u8]) -> Result<usize, ChannelError> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(ChannelError::Closed);
        }
        if bytes.is_empty() {
            return Ok(0);
        }

        state.bytes.extend(bytes.iter().copied());
        drop(state);
        self.readable.notify_all();

        tracing::trace!(count = bytes.len(), "queued bytes");
        Ok(bytes.len())
    }

    /// Dequeue up to `buf.len()` bytes without waiting.
    ///
    /// Returns `Ok(0)` when nothing is pending. When nothing is pending and an
    /// interrupt was signalled, the interrupt is consumed and reported instead.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        self.state.lock().try_read(buf)
    }

    /// Like [`read`](Self::read) but suspends until at least one byte, an
    /// interrupt or a close is available.
    pub fn read_blocking(&self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        let mut state = self.state.lock();
        loop {
            let count = state.try_read(buf)?;
            if count > 0 || buf.is_empty() {
                return Ok(count);
            }
            self.readable.wait(&mut state);
        }
    }

    /// Blocking read that gives up after `timeout`, returning `Ok(0)`.
    pub fn read_timeout(&self, buf: &mut [u8], timeout: Duration) -> Result<usize, ChannelError> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        loop {
            let count = state.try_read(buf)?;
            if count > 0 || buf.is_empty() {
                return Ok(count);
            }
            if self.readable.wait_until(&mut state, deadline).timed_out() {
                return state.try_read(buf);
            }
        }
    }

    /// Set the interrupt flag and wake any blocked reader.
    ///
    /// Repeated signals before a read collapse into one pending interrupt.
    pub fn signal_interrupt(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.interrupted = true;
        drop(state);
        self.readable.notify_all();
        tracing::debug!("interrupt signalled");
    }

    /// Drop pending data and fail every later read and write. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        state.interrupted = false;
        let dropped = state.bytes.len();
        state.bytes.clear();
        drop(state);
        self.readable.notify_all();
        tracing::debug!(dropped, "queue closed");
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    pub fn is_interrupt_pending(&self) -> bool {
        self.state.lock().interrupted
    }

    /// Number of bytes waiting to be read.
    pub fn len(&self) -> usize {
        self.state.lock().bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
