use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::error::{AvrError, AvrResult};
use crate::part::{MemoryDescriptor, PartDescriptor};
use crate::programmer::ProgrammerDriver;

/// Memories cleared by a chip erase
const ERASABLE: [&str; 2] = ["flash", "eeprom"];

pub type CallLog = Rc<RefCell<Vec<&'static str>>>;

/// In-memory target; memories start erased (0xFF)
#[derive(Default)]
pub struct DummyProgrammer {
    port: Option<String>,
    memories: HashMap<String, Vec<u8>>,
    signature: Option<[u8; 3]>,
    unresponsive: bool,
    fail_write_at: Option<(String, usize)>,
    calls: CallLog,
}

impl DummyProgrammer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report this signature instead of the part's own
    pub fn with_signature(mut self, signature: [u8; 3]) -> Self {
        self.signature = Some(signature);
        self
    }

    /// Target never answers when entering programming mode
    pub fn unresponsive(mut self) -> Self {
        self.unresponsive = true;
        self
    }

    /// Fail any block write touching `offset` of `memory`
    pub fn fail_write_at(mut self, memory: &str, offset: usize) -> Self {
        self.fail_write_at = Some((memory.to_owned(), offset));
        self
    }

    /// Names of the lifecycle hooks called so far, in order
    pub fn call_log(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    fn record(&self, call: &'static str) {
        self.calls.borrow_mut().push(call);
    }

    fn memory(&mut self, mem: &MemoryDescriptor) -> AvrResult<&mut Vec<u8>> {
        self.memories
            .get_mut(mem.desc())
            .ok_or_else(|| AvrError::Transport(format!("Simulated target has no {}", mem.desc())))
    }
}

fn out_of_range(mem: &MemoryDescriptor, addr: usize, len: usize) -> AvrError {
    AvrError::Transport(format!(
        "Access of {} bytes at {:#06x} is outside {} ({} bytes)",
        len,
        addr,
        mem.desc(),
        mem.size()
    ))
}

impl ProgrammerDriver for DummyProgrammer {
    fn open(&mut self, port: &str) -> AvrResult<()> {
        self.record("open");
        if port.is_empty() {
            return Err(AvrError::Transport(
                "Simulated programmer needs a port name".to_string(),
            ));
        }
        self.port = Some(port.to_owned());
        Ok(())
    }

    fn enable(&mut self, part: &PartDescriptor) -> AvrResult<()> {
        self.record("enable");
        let signature = self.signature.or(part.signature());

        self.memories = part
            .memories()
            .iter()
            .map(|mem| {
                let mut contents = vec![0xff; mem.size()];
                if let (Some(sig), "signature") = (signature, mem.desc()) {
                    let n = contents.len().min(sig.len());
                    contents[..n].copy_from_slice(&sig[..n]);
                }
                (mem.desc().to_owned(), contents)
            })
            .collect();

        debug!("Simulating {} with {} memories", part.id(), self.memories.len());
        Ok(())
    }

    fn initialize(&mut self, _part: &PartDescriptor) -> AvrResult<()> {
        self.record("initialize");
        if self.unresponsive {
            return Err(AvrError::Transport(
                "Simulated target is not responding".to_string(),
            ));
        }
        Ok(())
    }

    fn read_block(
        &mut self,
        _part: &PartDescriptor,
        mem: &MemoryDescriptor,
        addr: usize,
        buf: &mut [u8],
    ) -> AvrResult<()> {
        let contents = self.memory(mem)?;
        let src = contents
            .get(addr..addr + buf.len())
            .ok_or_else(|| out_of_range(mem, addr, buf.len()))?;
        buf.copy_from_slice(src);
        Ok(())
    }

    fn write_block(
        &mut self,
        _part: &PartDescriptor,
        mem: &MemoryDescriptor,
        addr: usize,
        data: &[u8],
    ) -> AvrResult<()> {
        if let Some((name, offset)) = &self.fail_write_at {
            if name == mem.desc() && (addr..addr + data.len()).contains(offset) {
                return Err(AvrError::Transport(format!(
                    "Simulated write failure at {:#06x}",
                    offset
                )));
            }
        }

        let contents = self.memory(mem)?;
        let dst = contents
            .get_mut(addr..addr + data.len())
            .ok_or_else(|| out_of_range(mem, addr, data.len()))?;
        dst.copy_from_slice(data);
        Ok(())
    }

    fn chip_erase(&mut self, _part: &PartDescriptor) -> AvrResult<()> {
        self.record("chip_erase");
        for name in ERASABLE {
            if let Some(contents) = self.memories.get_mut(name) {
                contents.fill(0xff);
            }
        }
        Ok(())
    }

    fn disable(&mut self) -> AvrResult<()> {
        self.record("disable");
        Ok(())
    }

    fn close(&mut self) -> AvrResult<()> {
        self.record("close");
        self.port = None;
        Ok(())
    }
}
