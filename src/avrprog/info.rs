use avrprog::Context;
use avrprog::error::AvrResult;
use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub(crate) struct PartOptions {
    /// Part id
    id: String,
}

pub(crate) fn list_parts(ctx: &Context) {
    println!("Valid parts are:");
    // Ids starting with a dot only exist to be inherited from
    for part in ctx.catalog().parts().iter().filter(|p| !p.id().starts_with('.')) {
        println!("  {:<10} = {}", part.id(), part.desc());
    }
}

pub(crate) fn list_programmers(ctx: &Context) {
    println!("Valid programmers are:");
    for programmer in ctx.catalog().programmers() {
        println!(
            "  {:<10} = {} ({:?}, {})",
            programmer.id(),
            programmer.desc(),
            programmer.transport(),
            programmer.protocol()
        );
    }
}

pub(crate) fn show_part(ctx: &Context, opts: PartOptions) -> AvrResult<()> {
    let part = ctx.catalog().require_part(&opts.id)?;
    print!("{}", part.overview());
    Ok(())
}
