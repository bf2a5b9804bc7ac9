//! This module contains the record-to-text conversion loop

// One record in, one line out. Nothing is held onto between records, so memory
// use doesn't depend on how big the capture is.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, ErrorKind, Read, Write},
    path::Path,
};

use tracing::{debug, info, trace};

use crate::{
    error::{Error, Result},
    format::{format_general, OutputFormat},
    record::{Record, RecordBytes},
    CHANNELS, FULL_SCALE, RECORD_SIZE, VOLTS_PRECISION,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConvertOptions {
    pub format: OutputFormat,
    /// Print channels in volts instead of raw codes
    pub to_volts: bool,
    /// Reference voltage, only used with `to_volts`
    pub vref: f64,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Tsv,
            to_volts: false,
            vref: 2.5,
        }
    }
}

/// Convert a signed ADC code to volts, where full-scale maps to +/- `vref`
pub fn code_to_volts(code: i32, vref: f64) -> f64 {
    (code as f64 / FULL_SCALE) * vref
}

/// The header line (without the newline)
pub fn header(format: OutputFormat, to_volts: bool) -> String {
    let delim = format.delimiter();
    let mut line = format!("seq{}tstamp_ns", delim);
    for i in 1..=CHANNELS {
        line.push(delim);
        if to_volts {
            line.push_str(&format!("ch{}_V", i));
        } else {
            line.push_str(&format!("ch{}", i));
        }
    }
    line
}

/// Render one record as a line (with the trailing newline) into `line`
fn push_line(line: &mut String, record: &Record, opts: &ConvertOptions) {
    let delim = opts.format.delimiter();
    line.clear();
    line.push_str(&format!("{}{}{}", record.seq, delim, record.tstamp_ns));
    for &code in &record.channels {
        line.push(delim);
        if opts.to_volts {
            line.push_str(&format_general(
                code_to_volts(code, opts.vref),
                VOLTS_PRECISION,
            ));
        } else {
            line.push_str(&code.to_string());
        }
    }
    line.push('\n');
}

/// Fill `buf` from `reader`, returning how many bytes we got before the stream ran dry
fn read_record<R: Read>(reader: &mut R, buf: &mut RecordBytes) -> io::Result<usize> {
    let mut filled = 0;
    while filled < RECORD_SIZE {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Stream every record from `input` to `output` as a delimited table.
/// Returns the number of records written.
pub fn convert<R: Read, W: Write>(
    mut input: R,
    mut output: W,
    opts: &ConvertOptions,
) -> Result<u64> {
    debug!(?opts, "Starting conversion");
    output.write_all(header(opts.format, opts.to_volts).as_bytes())?;
    output.write_all(b"\n")?;

    let mut buf = [0u8; RECORD_SIZE];
    let mut line = String::new();
    let mut count = 0u64;
    loop {
        let n = read_record(&mut input, &mut buf)?;
        if n == 0 {
            break;
        }
        if n != RECORD_SIZE {
            // Everything before the bad record stays put
            output.flush()?;
            return Err(Error::TruncatedRecord {
                offset: count * RECORD_SIZE as u64,
                available: n,
            });
        }
        let record = Record::decode(&buf);
        trace!(%record, "Decoded");
        push_line(&mut line, &record, opts);
        output.write_all(line.as_bytes())?;
        count += 1;
    }
    output.flush()?;
    Ok(count)
}

/// Convert the capture at `input` into a new table at `output` (created or truncated)
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    opts: &ConvertOptions,
) -> Result<u64> {
    let (input, output) = (input.as_ref(), output.as_ref());
    info!(input = %input.display(), output = %output.display(), "Converting capture");
    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output)?);
    let result = convert(reader, &mut writer, opts);
    let count = flush_after(&mut writer, result)?;
    info!(count, "Finished conversion");
    Ok(count)
}

/// Flush `writer` even if the conversion failed, reporting the conversion error first
fn flush_after<W: Write>(writer: &mut W, result: Result<u64>) -> Result<u64> {
    let flushed = writer.flush();
    let count = result?;
    flushed?;
    Ok(count)
}
