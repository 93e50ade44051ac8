use tracing::{debug, warn};

use crate::Context;
use crate::error::{AvrError, AvrResult, MemoryFault};
use crate::message::{imsg, pmsg};
use crate::part::{MemoryDescriptor, PartDescriptor};
use crate::programmer::{ProgrammerDescriptor, ProgrammerDriver, driver_for};
use crate::progress::ProgressReporter;
use crate::util::hex_bytes;

/// `Closed -> Opened -> Enabled -> Initialized -> (Reading | Writing)* -> Disabled -> Teardown -> Closed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Closed,
    Opened,
    Enabled,
    Initialized,
    Reading,
    Writing,
    Disabled,
    Teardown,
}

impl SessionState {
    fn allows_memory_access(self) -> bool {
        matches!(
            self,
            SessionState::Initialized | SessionState::Reading | SessionState::Writing
        )
    }
}

pub struct ProgrammerSession<'a> {
    ctx: &'a Context,
    programmer: &'a ProgrammerDescriptor,
    part: Option<&'a PartDescriptor>,
    driver: Box<dyn ProgrammerDriver>,
    port: String,
    state: SessionState,
    verify: bool,
    force: bool,
}

impl<'a> ProgrammerSession<'a> {
    /// Open a session using the driver named by the descriptor
    pub fn open(
        ctx: &'a Context,
        programmer: &'a ProgrammerDescriptor,
        port: &str,
    ) -> AvrResult<Self> {
        let driver = driver_for(programmer, None)?;
        Self::open_with_driver(ctx, programmer, driver, port)
    }

    /// Open a session on an explicitly constructed driver
    pub fn open_with_driver(
        ctx: &'a Context,
        programmer: &'a ProgrammerDescriptor,
        mut driver: Box<dyn ProgrammerDriver>,
        port: &str,
    ) -> AvrResult<Self> {
        pmsg!(
            ctx.messages(),
            Notice,
            "using programmer {} on port {}\n",
            programmer.id(),
            port
        );

        if let Err(e) = driver.open(port) {
            let e = match e {
                AvrError::Transport(_) => e,
                other => AvrError::Transport(other.to_string()),
            };
            pmsg!(ctx.messages(), Error, "unable to open port {}: {}\n", port, e);
            if let Err(close_err) = driver.close() {
                warn!("Closing driver after failed open: {}", close_err);
            }
            return Err(e);
        }

        debug!("Session on {} opened", programmer.id());
        Ok(ProgrammerSession {
            ctx,
            programmer,
            part: None,
            driver,
            port: port.to_owned(),
            state: SessionState::Opened,
            verify: false,
            force: false,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn programmer(&self) -> &'a ProgrammerDescriptor {
        self.programmer
    }

    pub fn part(&self) -> Option<&'a PartDescriptor> {
        self.part
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    /// Read back and compare every write
    pub fn set_verify(&mut self, verify: bool) {
        self.verify = verify;
    }

    /// Continue after a signature mismatch
    pub fn set_force(&mut self, force: bool) {
        self.force = force;
    }

    fn set_state(&mut self, state: SessionState) {
        debug!("Session state {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Report an error through the message dispatch and hand it back
    fn fail(&self, err: AvrError) -> AvrError {
        pmsg!(self.ctx.messages(), Error, "{}\n", err);
        err
    }

    fn out_of_order(&self, operation: &'static str) -> AvrError {
        self.fail(AvrError::OutOfOrder {
            operation,
            state: self.state,
        })
    }

    pub fn enable(&mut self, part: &'a PartDescriptor) -> AvrResult<()> {
        if self.state != SessionState::Opened {
            return Err(self.out_of_order("enable"));
        }

        let Some(signature_mem) = part.locate_memory("signature") else {
            return Err(self.fail(AvrError::Capability(format!(
                "part {} has no signature memory",
                part.id()
            ))));
        };
        if part.signature().is_none() {
            return Err(self.fail(AvrError::Capability(format!(
                "part {} has no known signature",
                part.id()
            ))));
        }
        if !self.driver.supports_memory(signature_mem) {
            return Err(self.fail(AvrError::Capability(format!(
                "programmer {} cannot read the signature of {}",
                self.programmer.id(),
                part.id()
            ))));
        }

        self.driver.enable(part).map_err(|e| self.fail(e))?;
        self.part = Some(part);
        self.set_state(SessionState::Enabled);
        Ok(())
    }

    pub fn initialize(&mut self, part: &PartDescriptor) -> AvrResult<()> {
        if self.state != SessionState::Enabled {
            return Err(self.out_of_order("initialize"));
        }
        let bound = self.bound_part("initialize")?;
        if bound.id() != part.id() {
            return Err(self.fail(AvrError::Init(format!(
                "session is enabled for {}, not {}",
                bound.id(),
                part.id()
            ))));
        }

        self.driver
            .initialize(bound)
            .map_err(|e| self.fail(AvrError::Init(format!("initialization failed: {}", e))))?;

        self.check_signature(bound)?;

        pmsg!(
            self.ctx.messages(),
            Info,
            "AVR device initialized and ready to accept instructions\n"
        );
        self.set_state(SessionState::Initialized);
        Ok(())
    }

    fn check_signature(&mut self, part: &'a PartDescriptor) -> AvrResult<()> {
        let (Some(mem), Some(expected)) = (part.locate_memory("signature"), part.signature())
        else {
            return Err(self.fail(AvrError::Init(format!(
                "part {} has no signature to check",
                part.id()
            ))));
        };

        let mut read = vec![0; mem.size().max(expected.len())];
        self.driver
            .read_block(part, mem, 0, &mut read[..mem.size()])
            .map_err(|e| self.fail(AvrError::Init(format!("cannot read signature: {}", e))))?;

        pmsg!(
            self.ctx.messages(),
            Info,
            "device signature = {} ({})\n",
            hex_bytes(&read[..expected.len()]),
            part.desc()
        );

        if read[..expected.len()] == expected {
            return Ok(());
        }

        if read.iter().all(|&b| b == 0x00) || read.iter().all(|&b| b == 0xff) {
            imsg!(
                self.ctx.messages(),
                Warning,
                "target does not answer, check connections and power\n"
            );
        }

        let err = AvrError::Init(format!(
            "signature mismatch for {}: expected {}, read {}",
            part.id(),
            hex_bytes(&expected),
            hex_bytes(&read[..expected.len()])
        ));
        if self.force {
            pmsg!(self.ctx.messages(), Warning, "{}, continuing\n", err);
            Ok(())
        } else {
            Err(self.fail(err))
        }
    }

    fn bound_part(&self, operation: &'static str) -> AvrResult<&'a PartDescriptor> {
        self.part.ok_or_else(|| self.out_of_order(operation))
    }

    /// Part and memory for a memory operation, or the reason it cannot run
    fn memory_target(
        &self,
        operation: &'static str,
        name: &str,
    ) -> AvrResult<(&'a PartDescriptor, &'a MemoryDescriptor)> {
        if !self.state.allows_memory_access() {
            return Err(self.out_of_order(operation));
        }
        let part = self.bound_part(operation)?;

        let mem = part
            .locate_memory(name)
            .ok_or_else(|| self.fail(AvrError::memory(name, MemoryFault::Unknown)))?;
        if !self.driver.supports_memory(mem) {
            return Err(self.fail(AvrError::memory(name, MemoryFault::Unsupported)));
        }

        Ok((part, mem))
    }

    pub fn read_memory(&mut self, name: &str) -> AvrResult<Vec<u8>> {
        let (part, mem) = self.memory_target("read_memory", name)?;

        self.set_state(SessionState::Reading);
        let data = self.read_all(part, mem, "Reading")?;

        pmsg!(
            self.ctx.messages(),
            Info,
            "{} byte{} of {} read\n",
            data.len(),
            if data.len() == 1 { "" } else { "s" },
            mem.desc()
        );
        Ok(data)
    }

    fn read_all(
        &mut self,
        part: &'a PartDescriptor,
        mem: &'a MemoryDescriptor,
        header: &str,
    ) -> AvrResult<Vec<u8>> {
        let ctx = self.ctx;
        let mut data = vec![0; mem.size()];
        let block = mem.block_size();
        let mut progress = ProgressReporter::new(ctx.progress_handler(), header);

        for (i, chunk) in data.chunks_mut(block).enumerate() {
            let offset = i * block;
            pmsg!(
                ctx.messages(),
                Trace2,
                "reading {} bytes of {} at {:#06x}\n",
                chunk.len(),
                mem.desc(),
                offset
            );
            if let Err(e) = self.driver.read_block(part, mem, offset, chunk) {
                return Err(self.fail(AvrError::memory(
                    mem.desc(),
                    MemoryFault::Transport(format!("at offset {:#06x}: {}", offset, e)),
                )));
            }
            progress.report_fraction(offset + chunk.len(), mem.size());
        }

        progress.report(100, None);
        Ok(data)
    }

    pub fn write_memory(&mut self, name: &str, data: &[u8]) -> AvrResult<()> {
        let (part, mem) = self.memory_target("write_memory", name)?;

        if mem.is_readonly() {
            return Err(self.fail(AvrError::memory(name, MemoryFault::ReadOnly)));
        }
        if data.len() > mem.size() {
            return Err(self.fail(AvrError::memory(
                name,
                MemoryFault::TooLarge {
                    len: data.len(),
                    size: mem.size(),
                },
            )));
        }
        if mem.paged() && data.len() % mem.page_size() != 0 {
            return Err(self.fail(AvrError::memory(
                name,
                MemoryFault::Misaligned {
                    len: data.len(),
                    page_size: mem.page_size(),
                },
            )));
        }

        self.set_state(SessionState::Writing);
        let ctx = self.ctx;
        let unit = if mem.paged() { mem.page_size() } else { 1 };
        let mut progress = ProgressReporter::new(ctx.progress_handler(), "Writing");

        for (i, chunk) in data.chunks(unit).enumerate() {
            let offset = i * unit;
            if let Err(e) = self.driver.write_block(part, mem, offset, chunk) {
                return Err(self.fail(AvrError::PartialWrite {
                    memory: name.to_owned(),
                    offset,
                    source: Box::new(e),
                }));
            }
            progress.report_fraction(offset + chunk.len(), data.len());
        }
        progress.report(100, None);
        drop(progress);

        pmsg!(
            ctx.messages(),
            Info,
            "{} bytes of {} written\n",
            data.len(),
            mem.desc()
        );

        if self.verify {
            self.verify_written(part, mem, data)?;
        }
        Ok(())
    }

    fn verify_written(
        &mut self,
        part: &'a PartDescriptor,
        mem: &'a MemoryDescriptor,
        expected: &[u8],
    ) -> AvrResult<()> {
        let actual = self.read_all(part, mem, "Verifying")?;

        if let Some(offset) = expected
            .iter()
            .zip(actual.iter())
            .position(|(e, a)| e != a)
        {
            return Err(self.fail(AvrError::memory(
                mem.desc(),
                MemoryFault::Verify {
                    offset,
                    expected: expected[offset],
                    actual: actual[offset],
                },
            )));
        }

        pmsg!(
            self.ctx.messages(),
            Info,
            "{} bytes of {} verified\n",
            expected.len(),
            mem.desc()
        );
        Ok(())
    }

    pub fn erase_chip(&mut self) -> AvrResult<()> {
        if !self.state.allows_memory_access() {
            return Err(self.out_of_order("erase_chip"));
        }
        let part = self.bound_part("erase_chip")?;

        pmsg!(self.ctx.messages(), Info, "erasing chip\n");
        self.driver.chip_erase(part).map_err(|e| self.fail(e))?;
        self.set_state(SessionState::Writing);
        Ok(())
    }

    /// Leave programming mode. Repeated calls are no-ops.
    pub fn disable(&mut self) -> AvrResult<()> {
        match self.state {
            SessionState::Disabled => return Ok(()),
            SessionState::Closed | SessionState::Teardown => {
                return Err(self.out_of_order("disable"));
            }
            _ => {}
        }

        let result = self.driver.disable();
        self.set_state(SessionState::Disabled);
        result.map_err(|e| {
            pmsg!(self.ctx.messages(), Warning, "disabling programmer failed: {}\n", e);
            e
        })
    }

    /// Release the programmer. Runs `disable` first when still needed and
    /// always ends in CLOSED; the first error seen is returned.
    pub fn close(&mut self) -> AvrResult<()> {
        if self.state == SessionState::Closed {
            return Ok(());
        }

        let mut first_err = None;
        if self.state != SessionState::Disabled {
            if let Err(e) = self.disable() {
                first_err = Some(e);
            }
        }

        self.set_state(SessionState::Teardown);
        if let Err(e) = self.driver.close() {
            pmsg!(self.ctx.messages(), Warning, "closing port {} failed: {}\n", self.port, e);
            first_err.get_or_insert(e);
        }
        self.set_state(SessionState::Closed);

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Drop for ProgrammerSession<'_> {
    fn drop(&mut self) {
        if self.state != SessionState::Closed {
            if let Err(e) = self.close() {
                warn!("Cleanup of dropped session failed: {}", e);
            }
        }
    }
}
