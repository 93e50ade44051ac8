use std::io::{Read, Write};
use std::time::{Duration, Instant};

use serialport::ClearBuffer;
use tracing::trace;

use super::DeviceInterface;
use crate::constants::{
    MAX_RESPONSE_SIZE, POST_RESET_BOOTUP_DELAY_MS, RESET_DTR_RTS_LOW_MS, RESPONSE_TIMEOUT_MS,
    SERIAL_TIMEOUT_MS,
};
use crate::error::{AvrError, AvrResult};

pub type BaudRate = u32;

/// Serial port device_interface layer
pub struct SerialPortDevice {
    serial_port: Box<dyn serialport::SerialPort>,
}

impl SerialPortDevice {
    pub fn new(port: &str, baud: BaudRate) -> AvrResult<SerialPortDevice> {
        let serial_port = serialport::new(port, baud)
            .timeout(Duration::from_millis(SERIAL_TIMEOUT_MS))
            .dtr_on_open(false)
            .open()
            .map_err(|e| AvrError::Transport(format!("Cannot open {}: {}", port, e)))?;

        Ok(SerialPortDevice { serial_port })
    }
}

impl DeviceInterface for SerialPortDevice {
    fn send(&mut self, command: &[u8]) -> AvrResult<()> {
        self.serial_port
            .write_all(command)
            .map_err(|e| AvrError::Transport(format!("{:?}", e)))?;
        trace!("Sent bytes {:02x?}", command);
        Ok(())
    }

    fn receive(&mut self, expected: usize) -> AvrResult<Vec<u8>> {
        let deadline = Instant::now() + Duration::from_millis(RESPONSE_TIMEOUT_MS);
        let mut buffer: Vec<u8> = Vec::with_capacity(expected);
        let mut chunk = vec![0; MAX_RESPONSE_SIZE];

        while buffer.len() < expected && Instant::now() < deadline {
            let want = (expected - buffer.len()).min(MAX_RESPONSE_SIZE);
            let size = self
                .serial_port
                .read(&mut chunk[..want])
                // Timeout error is fine, just continue
                .or_else(|e| {
                    if e.kind() == std::io::ErrorKind::TimedOut {
                        Ok(0)
                    } else {
                        Err(e)
                    }
                })
                .map_err(|e| AvrError::Transport(format!("{:?}", e)))?;

            buffer.extend_from_slice(&chunk[..size]);
        }

        trace!("Received bytes {:02x?}", buffer);
        Ok(buffer)
    }

    fn flush_buffers(&mut self) -> AvrResult<()> {
        self.serial_port.clear(ClearBuffer::All).map_err(|e| {
            AvrError::Transport(format!("Failed to flush send/receive buffers, {}", e))
        })?;

        Ok(())
    }

    fn reset(&mut self) -> AvrResult<()> {
        self.serial_port
            .write_data_terminal_ready(false)
            .map_err(|e| AvrError::Transport(format!("Failed to set DTR false: {:?}", e)))?;
        self.serial_port
            .write_request_to_send(false)
            .map_err(|e| AvrError::Transport(format!("Failed to set RTS false: {:?}", e)))?;

        std::thread::sleep(Duration::from_millis(RESET_DTR_RTS_LOW_MS));

        self.serial_port
            .write_data_terminal_ready(true)
            .map_err(|e| AvrError::Transport(format!("Failed to set DTR true: {:?}", e)))?;
        self.serial_port
            .write_request_to_send(true)
            .map_err(|e| AvrError::Transport(format!("Failed to set RTS true: {:?}", e)))?;

        std::thread::sleep(Duration::from_millis(POST_RESET_BOOTUP_DELAY_MS));
        Ok(())
    }
}
