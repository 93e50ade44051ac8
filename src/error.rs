use std::path::PathBuf;

use thiserror::Error;

use crate::session::SessionState;

#[derive(Error, Debug)]
pub enum AvrError {
    #[error("No usable configuration found, tried {tried:?}")]
    ConfigNotFound { tried: Vec<PathBuf> },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("No {kind} named {id:?} in catalog")]
    LookupMiss { kind: &'static str, id: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Capability error: {0}")]
    Capability(String),

    #[error("Cannot {operation} while session is {state:?}")]
    OutOfOrder {
        operation: &'static str,
        state: SessionState,
    },

    #[error("Initialization error: {0}")]
    Init(String),

    #[error("Memory error on {memory}: {fault}")]
    Memory { memory: String, fault: MemoryFault },

    #[error("Write to {memory} aborted at offset {offset:#06x}: {source}")]
    PartialWrite {
        memory: String,
        offset: usize,
        #[source]
        source: Box<AvrError>,
    },

    #[error("Firmware error: {0}")]
    FirmwareError(String),
}

/// What went wrong during a memory operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryFault {
    #[error("no such memory in part")]
    Unknown,

    #[error("not supported by this programmer")]
    Unsupported,

    #[error("memory is read-only")]
    ReadOnly,

    #[error("{len} bytes exceed memory size of {size}")]
    TooLarge { len: usize, size: usize },

    #[error("{len} bytes is not a multiple of the page size {page_size}")]
    Misaligned { len: usize, page_size: usize },

    #[error("mismatch at offset {offset:#06x}, expected {expected:#04x}, read {actual:#04x}")]
    Verify {
        offset: usize,
        expected: u8,
        actual: u8,
    },

    #[error("transport failure: {0}")]
    Transport(String),
}

impl AvrError {
    pub(crate) fn memory(memory: &str, fault: MemoryFault) -> Self {
        AvrError::Memory {
            memory: memory.to_owned(),
            fault,
        }
    }
}

pub type AvrResult<T> = std::result::Result<T, AvrError>;
