use std::path::PathBuf;

use avrprog::error::AvrResult;
use avrprog::{firmware, opcodes};
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub(crate) struct DisasmOptions {
    /// Intel HEX file
    file: PathBuf,

    /// First byte address to list
    #[arg(short, long, default_value_t = 0)]
    start: usize,

    /// Number of bytes to list, all when omitted
    #[arg(short, long)]
    length: Option<usize>,

    /// Decode for the reduced core (TPI parts)
    #[arg(short, long, default_value_t = false)]
    reduced_core: bool,
}

pub(crate) fn handle_disasm(opts: DisasmOptions) -> AvrResult<()> {
    let image = firmware::read_hex_file(&opts.file)?;

    let start = opts.start.min(image.len());
    let end = match opts.length {
        Some(len) => (start + len).min(image.len()),
        None => image.len(),
    };

    for instr in opcodes::disassemble(&image[start..end], start, opts.reduced_core) {
        let raw: Vec<String> = instr.bytes.iter().map(|b| format!("{:02x}", b)).collect();
        println!("{:6x}:  {:<12} {}", instr.address, raw.join(" "), instr);
    }

    Ok(())
}
