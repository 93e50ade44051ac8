use std::fs;
use std::path::PathBuf;

use avrprog::error::{AvrError, AvrResult};
use avrprog::{Context, firmware};
use clap::Parser;

use crate::target::{TargetOptions, start_session};

#[derive(Parser, Debug, Clone)]
pub(crate) struct ReadOptions {
    #[command(flatten)]
    target: TargetOptions,

    /// Memory to read
    #[arg(short, long, default_value = "flash")]
    memory: String,

    /// Output file, Intel HEX. Prints to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub(crate) fn handle_read(ctx: &Context, opts: ReadOptions) -> AvrResult<()> {
    let (mut session, _) = start_session(ctx, &opts.target)?;
    let data = session.read_memory(&opts.memory)?;
    session.close()?;

    let hex = firmware::to_intel_hex(&data)?;
    match opts.output {
        Some(path) => fs::write(&path, hex).map_err(|e| {
            AvrError::FirmwareError(format!("Failed to write {}: {}", path.display(), e))
        })?,
        None => print!("{}", hex),
    }

    Ok(())
}
