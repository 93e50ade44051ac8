use std::fs;
use std::path::Path;

use ihex::{Reader, Record};
use tracing::debug;

use crate::constants::{HEX_RECORD_SIZE, MAX_IMAGE_SIZE};
use crate::error::{AvrError, AvrResult};

/// Parse Intel HEX into a memory image starting at address 0.
/// Gaps between records read as erased flash (0xFF).
pub fn parse_intel_hex(hex_content: &str) -> AvrResult<Vec<u8>> {
    let mut image = Vec::new();
    let mut base: usize = 0;

    for record in Reader::new(hex_content) {
        let record = record.map_err(|e| {
            AvrError::FirmwareError(format!("Failed parsing record in hex file {:?}", e))
        })?;

        match record {
            Record::Data { offset, value } => {
                let start = base + offset as usize;
                let end = start + value.len();
                if end > MAX_IMAGE_SIZE {
                    return Err(AvrError::FirmwareError(format!(
                        "Record at {:#x} lies beyond the largest supported image",
                        start
                    )));
                }
                if image.len() < end {
                    image.resize(end, 0xff);
                }
                image[start..end].copy_from_slice(&value);
            }
            Record::ExtendedSegmentAddress(segment) => base = (segment as usize) << 4,
            Record::ExtendedLinearAddress(upper) => base = (upper as usize) << 16,
            Record::EndOfFile => break,
            Record::StartSegmentAddress { .. } | Record::StartLinearAddress(_) => {}
        }
    }

    debug!("Parsed hex image of {} bytes", image.len());
    Ok(image)
}

/// Read and parse an Intel HEX file
pub fn read_hex_file<P: AsRef<Path>>(path: P) -> AvrResult<Vec<u8>> {
    let path = path.as_ref();
    let hex_content = fs::read_to_string(path).map_err(|e| {
        AvrError::FirmwareError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_intel_hex(&hex_content)
}

/// Extend the image with 0xFF up to a whole number of pages
pub fn pad_to_page(image: &mut Vec<u8>, page_size: usize) {
    if page_size == 0 {
        return;
    }
    let padded = image.len().div_ceil(page_size) * page_size;
    image.resize(padded, 0xff);
}

/// Render an image as Intel HEX, switching the upper address with extended
/// linear address records past 64 KiB
pub fn to_intel_hex(image: &[u8]) -> AvrResult<String> {
    let mut records = Vec::new();
    let mut upper = 0;

    for (i, chunk) in image.chunks(HEX_RECORD_SIZE).enumerate() {
        let address = i * HEX_RECORD_SIZE;
        let chunk_upper = (address >> 16) as u16;
        if chunk_upper != upper {
            upper = chunk_upper;
            records.push(Record::ExtendedLinearAddress(upper));
        }
        records.push(Record::Data {
            offset: (address & 0xffff) as u16,
            value: chunk.to_vec(),
        });
    }
    records.push(Record::EndOfFile);

    ihex::create_object_file_representation(&records)
        .map_err(|e| AvrError::FirmwareError(format!("Failed writing hex records {:?}", e)))
}
