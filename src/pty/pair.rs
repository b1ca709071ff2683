//! Simulated pseudo-terminal: two linked endpoints over two byte queues.
//!
//! The controller is the terminal side (the console UI). Its writes are
//! keystrokes that flow to the peripheral, and its reads block until the
//! running command produces output. The peripheral is the command side: its
//! reads poll the keystroke queue, its writes are command output.

use std::sync::Arc;
use std::time::Duration;

use crate::error::ChannelError;
use crate::pty::queue::InterruptibleByteQueue;
use crate::pty::stream::ByteStream;

/// ASCII "end of text" (Ctrl-C), translated into an interrupt signal.
pub const INTERRUPT_BYTE: u8 = 0x03;

#[derive(Debug)]
struct Channel {
    /// Controller -> peripheral (keystrokes).
    input: InterruptibleByteQueue,
    /// Peripheral -> controller (command output).
    output: InterruptibleByteQueue,
    interrupt_byte: u8,
}

impl Channel {
    fn close(&self) {
        self.input.close();
        self.output.close();
    }

    fn is_closed(&self) -> bool {
        self.input.is_closed() || self.output.is_closed()
    }
}

/// Create a linked controller/peripheral pair using [`INTERRUPT_BYTE`].
pub fn create_pair() -> (Controller, Peripheral) {
    create_pair_with(INTERRUPT_BYTE)
}

/// Create a linked pair whose controller intercepts `interrupt_byte`.
pub fn create_pair_with(interrupt_byte: u8) -> (Controller, Peripheral) {
    let channel = Arc::new(Channel {
        input: InterruptibleByteQueue::new(),
        output: InterruptibleByteQueue::new(),
        interrupt_byte,
    });
    tracing::debug!(interrupt_byte, "pseudo-terminal pair created");
    (
        Controller {
            channel: Arc::clone(&channel),
        },
        Peripheral { channel },
    )
}

/// Terminal-side endpoint.
#[derive(Debug, Clone)]
pub struct Controller {
    channel: Arc<Channel>,
}

impl Controller {
    /// Block until the peripheral writes output or the channel closes.
    ///
    /// Interrupts only travel toward the peripheral, so this never returns
    /// `Interrupted`.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        self.channel.output.read_blocking(buf)
    }

    /// Blocking read bounded by `timeout`; `Ok(0)` means nothing arrived.
    pub fn read_timeout(&self, buf: &mut [u8], timeout: Duration) -> Result<usize, ChannelError> {
        self.channel.output.read_timeout(buf, timeout)
    }

    /// Send keystrokes to the peripheral.
    ///
    /// Interrupt bytes are not enqueued. Each one raises the interrupt flag on
    /// the input queue, which the peripheral observes on its first read that
    /// finds the queue empty.
    pub fn write(&self, bytes: &[u8]) -> Result<usize, ChannelError> {
        let input = &self.channel.input;
        if input.is_closed() {
            return Err(ChannelError::Closed);
        }

        let interrupt_byte = self.channel.interrupt_byte;
        let mut segments = bytes.split(|&b| b == interrupt_byte).peekable();
        while let Some(segment) = segments.next() {
            input.write(segment)?;
            if segments.peek().is_some() {
                input.signal_interrupt();
            }
        }
        Ok(bytes.len())
    }

    /// Same as writing the interrupt byte on its own.
    pub fn send_interrupt(&self) -> Result<(), ChannelError> {
        if self.channel.input.is_closed() {
            return Err(ChannelError::Closed);
        }
        self.channel.input.signal_interrupt();
        Ok(())
    }

    pub fn interrupt_byte(&self) -> u8 {
        self.channel.interrupt_byte
    }

    /// Close both directions for both endpoints.
    pub fn close(&self) {
        self.channel.close();
    }

    pub fn is_closed(&self) -> bool {
        self.channel.is_closed()
    }
}

/// Command-side endpoint.
#[derive(Debug, Clone)]
pub struct Peripheral {
    channel: Arc<Channel>,
}

impl Peripheral {
    /// Poll pending keystrokes; `Ok(0)` when none are queued.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        self.channel.input.read(buf)
    }

    /// Wait for keystrokes, for commands that want a blocking stdin.
    pub fn read_blocking(&self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        self.channel.input.read_blocking(buf)
    }

    /// Emit command output to the controller.
    pub fn write(&self, bytes: &[u8]) -> Result<usize, ChannelError> {
        self.channel.output.write(bytes)
    }

    /// View of this endpoint whose [`ByteStream::read`] blocks.
    pub fn into_blocking(self) -> BlockingPeripheral {
        BlockingPeripheral(self)
    }

    /// Close both directions for both endpoints.
    pub fn close(&self) {
        self.channel.close();
    }

    pub fn is_closed(&self) -> bool {
        self.channel.is_closed()
    }
}

/// Peripheral whose stream reads wait for keystrokes, for line-oriented commands.
#[derive(Debug, Clone)]
pub struct BlockingPeripheral(Peripheral);

impl BlockingPeripheral {
    pub fn peripheral(&self) -> &Peripheral {
        &self.0
    }
}

impl ByteStream for BlockingPeripheral {
    fn read(&self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        self.0.read_blocking(buf)
    }

    fn write(&self, bytes: &[u8]) -> Result<usize, ChannelError> {
        self.0.write(bytes)
    }

    fn close(&self) {
        self.0.close();
    }
}

impl ByteStream for Controller {
    fn read(&self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        Controller::read(self, buf)
    }

    fn write(&self, bytes: &[u8]) -> Result<usize, ChannelError> {
        Controller::write(self, bytes)
    }

    fn close(&self) {
        Controller::close(self);
    }
}

impl ByteStream for Peripheral {
    fn read(&self, buf: &mut [u8]) -> Result<usize, ChannelError> {
        Peripheral::read(self, buf)
    }

    fn write(&self, bytes: &[u8]) -> Result<usize, ChannelError> {
        Peripheral::write(self, bytes)
    }

    fn close(&self) {
        Peripheral::close(self);
    }
}
