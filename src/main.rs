use ads1278_unpack::{args, convert_file, Error};
use anyhow::Context;
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // Get the CLI options
    let cli = args::Args::parse();
    // Logs go to stderr, stdout only gets the summary
    tracing_subscriber::fmt()
        .with_max_level(args::convert_filter(cli.verbose.log_level_filter()))
        .with_writer(std::io::stderr)
        .init();

    let output = cli.output_path();
    let opts = cli.options();
    info!(?opts, "Starting ads1278_unpack");

    let count = match convert_file(&cli.input, &output, &opts) {
        Ok(count) => count,
        Err(e @ Error::TruncatedRecord { .. }) => {
            return Err(e).with_context(|| format!("Malformed capture {}", cli.input.display()))
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Failed converting {} to {}",
                    cli.input.display(),
                    output.display()
                )
            })
        }
    };

    println!("Wrote {} record(s) to {}", count, output.display());
    Ok(())
}
