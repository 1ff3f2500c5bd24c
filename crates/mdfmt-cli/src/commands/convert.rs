use crate::cli::ConvertArgs;
use crate::config;
use crate::error::Result;
use mdfmt::workflows;
use tracing::info;

pub fn run(args: ConvertArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let options = config::build_convert_options(&args)?;

    info!("Invoking the conversion workflow...");
    let report = workflows::convert::run(&args.input, &args.output, &options)?;

    println!(
        "✓ Converted {} ({}) to {} ({}):",
        args.input.display(),
        report.from,
        args.output.display(),
        report.to
    );
    for (section, rows) in &report.written {
        println!("  {:<10} {}", section.name(), rows);
    }
    Ok(())
}
