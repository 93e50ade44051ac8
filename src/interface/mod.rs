pub mod serialport;

use crate::error::AvrResult;

/// Byte level link to a programmer
pub trait DeviceInterface {
    /// Send a command to the target device
    fn send(&mut self, command: &[u8]) -> AvrResult<()>;

    /// Block until `expected` bytes arrived or the response timeout passed.
    /// May return fewer bytes than expected.
    fn receive(&mut self, expected: usize) -> AvrResult<Vec<u8>>;

    /// Drop anything still pending in the send/receive buffers
    fn flush_buffers(&mut self) -> AvrResult<()>;

    /// Reset the target device
    fn reset(&mut self) -> AvrResult<()>;
}
