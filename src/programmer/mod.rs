use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AvrError, AvrResult};
use crate::part::{MemoryDescriptor, PartDescriptor};

pub mod dummy;
pub mod stk500v1;

/// How a programmer reaches the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Usb,
    Serial,
    Bitbang,
    Spi,
    Virtual,
}

/// A programmer as described by the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgrammerDescriptor {
    pub(crate) id: String,
    pub(crate) desc: String,
    pub(crate) transport: TransportKind,
    pub(crate) protocol: String,
    pub(crate) baudrate: Option<u32>,
    pub(crate) config_file: PathBuf,
    pub(crate) lineno: usize,
}

impl ProgrammerDescriptor {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn desc(&self) -> &str {
        &self.desc
    }

    pub fn transport(&self) -> TransportKind {
        self.transport
    }

    /// Name of the driver implementing this programmer
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn baudrate(&self) -> Option<u32> {
        self.baudrate
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn lineno(&self) -> usize {
        self.lineno
    }
}

/// Lifecycle hooks every programmer driver provides.
///
/// The session owns the ordering; a driver may assume it is only called in a
/// valid sequence. `addr` is always a byte offset into the memory.
pub trait ProgrammerDriver {
    /// Establish the connection to the programmer
    fn open(&mut self, port: &str) -> AvrResult<()>;

    /// Prepare the programmer for the given part
    fn enable(&mut self, part: &PartDescriptor) -> AvrResult<()>;

    /// Bring the target into programming mode
    fn initialize(&mut self, part: &PartDescriptor) -> AvrResult<()>;

    fn supports_memory(&self, _mem: &MemoryDescriptor) -> bool {
        true
    }

    fn read_block(
        &mut self,
        part: &PartDescriptor,
        mem: &MemoryDescriptor,
        addr: usize,
        buf: &mut [u8],
    ) -> AvrResult<()>;

    fn write_block(
        &mut self,
        part: &PartDescriptor,
        mem: &MemoryDescriptor,
        addr: usize,
        data: &[u8],
    ) -> AvrResult<()>;

    fn chip_erase(&mut self, _part: &PartDescriptor) -> AvrResult<()> {
        Err(AvrError::Capability(
            "programmer cannot erase the chip".to_string(),
        ))
    }

    /// Leave programming mode; must be safe to call after any failure
    fn disable(&mut self) -> AvrResult<()>;

    /// Release the transport
    fn close(&mut self) -> AvrResult<()>;
}

/// Instantiate the driver named by a descriptor's protocol.
/// `baud` overrides the descriptor's configured baud rate.
pub fn driver_for(
    descriptor: &ProgrammerDescriptor,
    baud: Option<u32>,
) -> AvrResult<Box<dyn ProgrammerDriver>> {
    let driver: Box<dyn ProgrammerDriver> = match descriptor.protocol.as_str() {
        "dummy" => Box::new(dummy::DummyProgrammer::new()),
        "stk500v1" | "arduino" => Box::new(stk500v1::Stk500v1::new(
            baud.or(descriptor.baudrate)
                .unwrap_or(stk500v1::DEFAULT_BAUD_RATE),
        )),
        other => {
            return Err(AvrError::Capability(format!(
                "No driver available for protocol {:?} of programmer {}",
                other, descriptor.id
            )));
        }
    };

    Ok(driver)
}
