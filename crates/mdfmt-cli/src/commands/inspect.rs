use crate::cli::InspectArgs;
use crate::config;
use crate::error::Result;
use mdfmt::workflows;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let header_scan_limit = config::resolve_header_scan_limit(args.header_scan_limit)?;

    info!("Inspecting {:?}", &args.path);
    let summary = workflows::inspect::run(&args.path, args.format, header_scan_limit)?;

    println!("{}", args.path.display());
    println!("{}", summary);
    Ok(())
}
