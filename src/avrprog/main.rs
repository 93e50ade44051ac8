use std::io::IsTerminal;
use std::path::PathBuf;

use avrprog::message::ConsoleMessages;
use avrprog::progress::{BarProgress, LineProgress};
use avrprog::{Context, MsgLevel, config_search_path, error::AvrResult};
use clap::{ArgAction, Parser, Subcommand};
use disasm::{DisasmOptions, handle_disasm};
use info::{PartOptions, list_parts, list_programmers, show_part};
use program::{EraseOptions, ProgramOptions, handle_erase, handle_programming};
use read::{ReadOptions, handle_read};

mod disasm;
mod info;
mod program;
mod read;
mod target;

#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
struct Cli {
    /// Catalog file, tried before the default locations. May be repeated.
    #[arg(short = 'C', long = "config", global = true)]
    config: Vec<PathBuf>,

    /// More output, repeat for even more
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Less output, repeat for even less
    #[arg(short, long, action = ArgAction::Count, global = true)]
    quiet: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// List known parts
    Parts,

    /// List known programmers
    Programmers,

    /// Show the definition of one part
    Part(PartOptions),

    /// Read a memory of the target into an Intel HEX file
    #[command(alias = "r")]
    Read(ReadOptions),

    /// Program target device with options
    #[command(alias = "p")]
    Program(ProgramOptions),

    /// Erase flash and EEPROM of the target
    Erase(EraseOptions),

    /// Disassemble an Intel HEX file
    Disasm(DisasmOptions),
}

fn tracing_level(verbose: u8) -> tracing::Level {
    match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}

fn main() -> AvrResult<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(tracing_level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    let verbosity = MsgLevel::saturating_from(
        MsgLevel::Info.index() as i32 + cli.verbose as i32 - cli.quiet as i32,
    );

    let mut ctx = Context::load(&config_search_path(&cli.config))?;
    ctx.set_verbosity(verbosity);
    let settings = ctx.messages().settings();
    ctx.register_message_handler(Some(Box::new(ConsoleMessages::new(settings))));
    if cli.quiet == 0 {
        if std::io::stderr().is_terminal() {
            ctx.register_progress_handler(Some(Box::new(BarProgress::new())));
        } else {
            ctx.register_progress_handler(Some(Box::new(LineProgress::stderr())));
        }
    }

    match cli.command {
        Command::Parts => list_parts(&ctx),
        Command::Programmers => list_programmers(&ctx),
        Command::Part(opts) => show_part(&ctx, opts)?,
        Command::Read(opts) => handle_read(&ctx, opts)?,
        Command::Program(opts) => handle_programming(&ctx, opts)?,
        Command::Erase(opts) => handle_erase(&ctx, opts)?,
        Command::Disasm(opts) => handle_disasm(opts)?,
    }

    Ok(())
}
