//! Simulated terminal channel: byte queues, endpoint pair and stream helpers.

mod line;
mod pair;
mod queue;
mod stream;

pub use line::LineReader;
pub use pair::{
    create_pair, create_pair_with, BlockingPeripheral, Controller, Peripheral, INTERRUPT_BYTE,
};
pub use queue::InterruptibleByteQueue;
pub use stream::{ByteStream, MemoryStream, SharedStream};
