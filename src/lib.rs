//! Unpacking of ADS1278 capture files into delimited text tables

pub mod args;
pub mod convert;
pub mod error;
pub mod format;
pub mod record;

/// Number of ADC channels in each record
pub const CHANNELS: usize = 8;
/// Size of one on-disk record: seq + timestamp + one i32 per channel
pub const RECORD_SIZE: usize = 8 + 8 + CHANNELS * 4;
/// Size of one raw TDM frame out of the ADC (24 bits per channel)
pub const TDM_FRAME_SIZE: usize = CHANNELS * 3;
/// Full-scale magnitude of a signed 24-bit code
pub const FULL_SCALE: f64 = (1u32 << 23) as f64;
/// Significant digits used when printing volts
pub const VOLTS_PRECISION: usize = 12;

pub use convert::{convert, convert_file, ConvertOptions};
pub use error::{Error, Result};
pub use format::OutputFormat;
pub use record::Record;
