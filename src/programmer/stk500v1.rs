use tracing::{debug, info, trace};

use crate::constants::SYNC_ATTEMPTS;
use crate::error::{AvrError, AvrResult};
use crate::interface::DeviceInterface;
use crate::interface::serialport::{BaudRate, SerialPortDevice};
use crate::part::{MemoryDescriptor, PartDescriptor};
use crate::programmer::ProgrammerDriver;

pub const DEFAULT_BAUD_RATE: BaudRate = 115200;

/// Largest block a bootloader accepts in one page command
const MAX_BLOCK_SIZE: usize = 256;

#[repr(u8)]
pub enum Stk500v1Message {
    CmndStkGetSync = 0x30,
    CmndStkSetDevice = 0x42,
    CmndStkEnterProgMode = 0x50,
    CmndStkLeaveProgMode = 0x51,
    CmndStkLoadAddress = 0x55,
    CmndStkProgPage = 0x64,
    CmndStkReadPage = 0x74,
    CmndStkReadSign = 0x75,
    SyncCrcEop = 0x20,
    RespStkInSync = 0x14,
    RespStkOk = 0x10,
}

/// STK500 version 1 protocol as spoken by Arduino style bootloaders
pub struct Stk500v1 {
    baud: BaudRate,
    interface: Option<Box<dyn DeviceInterface>>,
}

impl Stk500v1 {
    pub fn new(baud: BaudRate) -> Self {
        Stk500v1 {
            baud,
            interface: None,
        }
    }

    /// Use an already connected interface instead of opening a serial port
    pub fn with_interface(interface: Box<dyn DeviceInterface>) -> Self {
        Stk500v1 {
            baud: DEFAULT_BAUD_RATE,
            interface: Some(interface),
        }
    }

    fn interface(&mut self) -> AvrResult<&mut Box<dyn DeviceInterface>> {
        self.interface
            .as_mut()
            .ok_or_else(|| AvrError::Transport("STK500v1 link is not open".to_string()))
    }

    /// Send a command and return the payload framed by INSYNC ... OK
    fn transact(&mut self, cmd: &[u8], payload_len: usize) -> AvrResult<Vec<u8>> {
        let interface = self.interface()?;
        interface.send(cmd)?;
        let response = interface.receive(payload_len + 2)?;

        let framed = response.len() == payload_len + 2
            && response.first() == Some(&(Stk500v1Message::RespStkInSync as u8))
            && response.last() == Some(&(Stk500v1Message::RespStkOk as u8));
        if !framed {
            return Err(AvrError::Transport(format!(
                "Unexpected response {:02x?} for command {:#04x}",
                response, cmd[0]
            )));
        }

        Ok(response[1..=payload_len].to_vec())
    }

    fn sync(&mut self) -> AvrResult<()> {
        info!("Attempting to sync with target");
        let cmd = [
            Stk500v1Message::CmndStkGetSync as u8,
            Stk500v1Message::SyncCrcEop as u8,
        ];

        for attempt in 1..=SYNC_ATTEMPTS {
            self.interface()?.flush_buffers()?;
            match self.transact(&cmd, 0) {
                Ok(_) => {
                    info!("Synced with MCU");
                    return Ok(());
                }
                Err(e) => debug!("Sync attempt {}/{} failed: {}", attempt, SYNC_ATTEMPTS, e),
            }
        }

        Err(AvrError::Transport(format!(
            "Programmer not responding after {} sync attempts",
            SYNC_ATTEMPTS
        )))
    }

    fn set_options(&mut self, part: &PartDescriptor) -> AvrResult<()> {
        let page_size = part
            .locate_memory("flash")
            .map(|m| m.page_size())
            .unwrap_or(0) as u16;
        let eeprom_size = part
            .locate_memory("eeprom")
            .map(|m| m.size())
            .unwrap_or(0) as u16;
        let flash_size = part
            .locate_memory("flash")
            .map(|m| m.size())
            .unwrap_or(0) as u32;

        let mut cmd = vec![
            Stk500v1Message::CmndStkSetDevice as u8,
            0,    // Device code
            0,    // Revision
            0,    // ProgType
            1,    // ParMode
            1,    // Polling
            1,    // SelfTimed
            1,    // LockBytes
            3,    // FuseBytes
            0xff, // FlashPollVal1
            0xff, // FlashPollVal2
            0xff, // eepromPollVal1
            0xff, // eepromPollVal2
        ];
        cmd.extend_from_slice(&page_size.to_be_bytes());
        cmd.extend_from_slice(&eeprom_size.to_be_bytes());
        cmd.extend_from_slice(&flash_size.to_be_bytes());
        cmd.push(Stk500v1Message::SyncCrcEop as u8);

        self.transact(&cmd, 0)?;
        debug!("Set device options for {}", part.id());
        Ok(())
    }

    fn load_address(&mut self, address: usize) -> AvrResult<()> {
        let address = u16::try_from(address).map_err(|_| {
            AvrError::Capability(format!(
                "Address {:#x} is beyond the 16 bit range of STK500v1",
                address
            ))
        })?;
        let [high, low] = address.to_be_bytes();

        self.transact(
            &[
                Stk500v1Message::CmndStkLoadAddress as u8,
                low,
                high,
                Stk500v1Message::SyncCrcEop as u8,
            ],
            0,
        )?;
        Ok(())
    }

    fn read_signature(&mut self) -> AvrResult<Vec<u8>> {
        self.transact(
            &[
                Stk500v1Message::CmndStkReadSign as u8,
                Stk500v1Message::SyncCrcEop as u8,
            ],
            3,
        )
    }
}

/// Memory type byte and address divisor: flash is word addressed
fn memtype(mem: &MemoryDescriptor) -> Option<(u8, usize)> {
    match mem.desc() {
        "flash" => Some((b'F', 2)),
        "eeprom" => Some((b'E', 1)),
        _ => None,
    }
}

impl ProgrammerDriver for Stk500v1 {
    fn open(&mut self, port: &str) -> AvrResult<()> {
        if self.interface.is_none() {
            self.interface = Some(Box::new(SerialPortDevice::new(port, self.baud)?));
        }

        self.interface()?.reset()?;
        self.sync()
    }

    fn enable(&mut self, part: &PartDescriptor) -> AvrResult<()> {
        match part.locate_memory("flash") {
            Some(flash) if flash.paged() => self.set_options(part),
            _ => Err(AvrError::Capability(format!(
                "STK500v1 needs a paged flash memory, part {} has none",
                part.id()
            ))),
        }
    }

    fn initialize(&mut self, _part: &PartDescriptor) -> AvrResult<()> {
        self.transact(
            &[
                Stk500v1Message::CmndStkEnterProgMode as u8,
                Stk500v1Message::SyncCrcEop as u8,
            ],
            0,
        )?;
        info!("Entered programming mode");
        Ok(())
    }

    fn supports_memory(&self, mem: &MemoryDescriptor) -> bool {
        mem.desc() == "signature" || memtype(mem).is_some()
    }

    fn read_block(
        &mut self,
        _part: &PartDescriptor,
        mem: &MemoryDescriptor,
        addr: usize,
        buf: &mut [u8],
    ) -> AvrResult<()> {
        if mem.desc() == "signature" {
            let signature = self.read_signature()?;
            let available = signature.get(addr..).unwrap_or_default();
            if available.len() < buf.len() {
                return Err(AvrError::Transport(format!(
                    "Signature read of {} bytes at {} is out of range",
                    buf.len(),
                    addr
                )));
            }
            buf.copy_from_slice(&available[..buf.len()]);
            return Ok(());
        }

        let (kind, divisor) = memtype(mem).ok_or_else(|| {
            AvrError::Capability(format!("STK500v1 cannot read {}", mem.desc()))
        })?;

        for (i, chunk) in buf.chunks_mut(MAX_BLOCK_SIZE).enumerate() {
            let offset = addr + i * MAX_BLOCK_SIZE;
            self.load_address(offset / divisor)?;

            let [high, low] = (chunk.len() as u16).to_be_bytes();
            let data = self.transact(
                &[
                    Stk500v1Message::CmndStkReadPage as u8,
                    high,
                    low,
                    kind,
                    Stk500v1Message::SyncCrcEop as u8,
                ],
                chunk.len(),
            )?;
            chunk.copy_from_slice(&data);
            trace!("Read {} bytes of {} at {:#06x}", chunk.len(), mem.desc(), offset);
        }

        Ok(())
    }

    fn write_block(
        &mut self,
        _part: &PartDescriptor,
        mem: &MemoryDescriptor,
        addr: usize,
        data: &[u8],
    ) -> AvrResult<()> {
        let (kind, divisor) = memtype(mem).ok_or_else(|| {
            AvrError::Capability(format!("STK500v1 cannot write {}", mem.desc()))
        })?;

        for (i, chunk) in data.chunks(MAX_BLOCK_SIZE).enumerate() {
            let offset = addr + i * MAX_BLOCK_SIZE;
            self.load_address(offset / divisor)?;

            let [high, low] = (chunk.len() as u16).to_be_bytes();
            let cmd = [
                &[Stk500v1Message::CmndStkProgPage as u8, high, low, kind][..],
                chunk,
                &[Stk500v1Message::SyncCrcEop as u8][..],
            ]
            .concat();
            self.transact(&cmd, 0)?;
            trace!("Wrote {} bytes of {} at {:#06x}", chunk.len(), mem.desc(), offset);
        }

        Ok(())
    }

    fn disable(&mut self) -> AvrResult<()> {
        if self.interface.is_none() {
            return Ok(());
        }

        self.transact(
            &[
                Stk500v1Message::CmndStkLeaveProgMode as u8,
                Stk500v1Message::SyncCrcEop as u8,
            ],
            0,
        )?;
        info!("Left programming mode");
        Ok(())
    }

    fn close(&mut self) -> AvrResult<()> {
        self.interface = None;
        Ok(())
    }
}
