use avrprog::error::AvrResult;
use avrprog::programmer::driver_for;
use avrprog::{Context, PartDescriptor, ProgrammerSession};
use clap::Args;

/// Which programmer talks to which part over which port
#[derive(Args, Debug, Clone)]
pub(crate) struct TargetOptions {
    /// Programmer id from the catalog
    #[arg(short = 'c', long)]
    programmer: String,

    /// Part id from the catalog
    #[arg(short, long)]
    part: String,

    /// Port the programmer is connected to
    #[arg(short = 'P', long, default_value = "/dev/ttyUSB0")]
    port: String,

    /// Baud rate, overrides the catalog
    #[arg(short, long)]
    baudrate: Option<u32>,

    /// Continue when the device signature does not match the part
    #[arg(short = 'F', long, default_value_t = false)]
    force: bool,
}

/// Open, enable and initialize a session for `opts`
pub(crate) fn start_session<'a>(
    ctx: &'a Context,
    opts: &TargetOptions,
) -> AvrResult<(ProgrammerSession<'a>, &'a PartDescriptor)> {
    let catalog = ctx.catalog();
    let part = catalog.require_part(&opts.part)?;
    let programmer = catalog.require_programmer(&opts.programmer)?;

    let driver = driver_for(programmer, opts.baudrate)?;
    let mut session = ProgrammerSession::open_with_driver(ctx, programmer, driver, &opts.port)?;
    session.set_force(opts.force);

    session.enable(part)?;
    session.initialize(part)?;

    Ok((session, part))
}
