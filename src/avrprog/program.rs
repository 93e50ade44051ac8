use std::path::PathBuf;

use avrprog::error::{AvrError, AvrResult};
use avrprog::{Context, MemoryFault, firmware};
use clap::Parser;

use crate::target::{TargetOptions, start_session};

#[derive(Parser, Debug, Clone)]
pub(crate) struct ProgramOptions {
    #[command(flatten)]
    target: TargetOptions,

    /// Firmware
    #[arg(short, long)]
    firmware: PathBuf,

    /// Memory to program
    #[arg(short, long, default_value = "flash")]
    memory: String,

    #[arg(short, long, default_value_t = false)]
    no_verify: bool,

    /// Erase the chip before programming
    #[arg(short, long, default_value_t = false)]
    erase: bool,
}

pub(crate) fn handle_programming(ctx: &Context, opts: ProgramOptions) -> AvrResult<()> {
    let (mut session, part) = start_session(ctx, &opts.target)?;
    let mem = part.locate_memory(&opts.memory).ok_or_else(|| AvrError::Memory {
        memory: opts.memory.clone(),
        fault: MemoryFault::Unknown,
    })?;

    let mut image = firmware::read_hex_file(&opts.firmware)?;
    if mem.paged() {
        firmware::pad_to_page(&mut image, mem.page_size());
    }

    if opts.erase {
        session.erase_chip()?;
    }
    session.set_verify(!opts.no_verify);
    session.write_memory(&opts.memory, &image)?;

    session.close()
}

#[derive(Parser, Debug, Clone)]
pub(crate) struct EraseOptions {
    #[command(flatten)]
    target: TargetOptions,
}

pub(crate) fn handle_erase(ctx: &Context, opts: EraseOptions) -> AvrResult<()> {
    let (mut session, _) = start_session(ctx, &opts.target)?;
    session.erase_chip()?;
    session.close()
}
