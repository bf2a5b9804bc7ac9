//! Argument parsing for running from the command line

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::{convert::ConvertOptions, format::OutputFormat};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Unpack ads1278_dump binary captures into TSV/CSV text", long_about = None)]
pub struct Args {
    /// Binary capture file produced by ads1278_dump --out
    pub input: PathBuf,
    /// Output text file (default: the input path with a .tsv or .csv extension)
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    /// Output delimiter format
    #[clap(long, value_enum, default_value_t = OutputFormat::Tsv)]
    pub format: OutputFormat,
    /// Convert channel samples to volts (see --vref)
    #[clap(long)]
    pub to_volts: bool,
    /// Reference voltage used for --to-volts conversion
    #[clap(long, default_value_t = 2.5, value_parser = valid_vref)]
    pub vref: f64,
    #[clap(flatten)]
    pub verbose: clap_verbosity_flag::Verbosity,
}

impl Args {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            format: self.format,
            to_volts: self.to_volts,
            vref: self.vref,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input, self.format))
    }
}

/// Swap (or add) the extension of `input` for the one matching `format`
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    input.with_extension(format.extension())
}

/// Match verbosity filter with tracing subscriber log levels
pub fn convert_filter(filter: log::LevelFilter) -> tracing_subscriber::filter::LevelFilter {
    match filter {
        log::LevelFilter::Off => tracing_subscriber::filter::LevelFilter::OFF,
        log::LevelFilter::Error => tracing_subscriber::filter::LevelFilter::ERROR,
        log::LevelFilter::Warn => tracing_subscriber::filter::LevelFilter::WARN,
        log::LevelFilter::Info => tracing_subscriber::filter::LevelFilter::INFO,
        log::LevelFilter::Debug => tracing_subscriber::filter::LevelFilter::DEBUG,
        log::LevelFilter::Trace => tracing_subscriber::filter::LevelFilter::TRACE,
    }
}

fn valid_vref(s: &str) -> Result<f64, String> {
    let vref: f64 = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if vref.is_finite() && vref > 0.0 {
        Ok(vref)
    } else {
        Err("Reference voltage must be positive".to_string())
    }
}
