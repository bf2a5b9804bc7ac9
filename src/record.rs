//! The fixed-layout capture record and its byte codec
//!
//! Every record is 48 bytes, little-endian, no padding:
//! `seq: u64`, `tstamp_ns: u64`, then one `i32` per channel.

use std::{fmt, io::Write};

use byteorder::{ByteOrder, LittleEndian, WriteBytesExt};

use crate::{CHANNELS, RECORD_SIZE, TDM_FRAME_SIZE};

pub type RecordBytes = [u8; RECORD_SIZE];
pub type TdmFrameBytes = [u8; TDM_FRAME_SIZE];

/// One simultaneous sample across all channels
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Record {
    pub seq: u64,
    pub tstamp_ns: u64,
    /// Sign-extended 24-bit codes
    pub channels: [i32; CHANNELS],
}

impl Record {
    pub fn decode(bytes: &RecordBytes) -> Self {
        let mut channels = [0i32; CHANNELS];
        LittleEndian::read_i32_into(&bytes[16..], &mut channels);
        Self {
            seq: LittleEndian::read_u64(&bytes[0..8]),
            tstamp_ns: LittleEndian::read_u64(&bytes[8..16]),
            channels,
        }
    }

    pub fn encode(&self) -> RecordBytes {
        let mut bytes = [0u8; RECORD_SIZE];
        LittleEndian::write_u64(&mut bytes[0..8], self.seq);
        LittleEndian::write_u64(&mut bytes[8..16], self.tstamp_ns);
        LittleEndian::write_i32_into(&self.channels, &mut bytes[16..]);
        bytes
    }

    /// Append this record to a capture stream
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_u64::<LittleEndian>(self.seq)?;
        writer.write_u64::<LittleEndian>(self.tstamp_ns)?;
        for ch in self.channels {
            writer.write_i32::<LittleEndian>(ch)?;
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "seq={} tstamp_ns={} ch=[", self.seq, self.tstamp_ns)?;
        for (i, ch) in self.channels.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", ch)?;
        }
        f.write_str("]")
    }
}

/// Sign-extend the low 24 bits of `raw` into an i32
pub fn sign_extend_24(raw: u32) -> i32 {
    // Shift the sign bit up to bit 31 and let the arithmetic shift drag it back down
    ((raw << 8) as i32) >> 8
}

/// Unpack a raw TDM frame from the ADC into channel codes
pub fn unpack_tdm_frame(frame: &TdmFrameBytes, channels: &mut [i32; CHANNELS]) {
    for (i, sample) in frame.chunks_exact(3).enumerate() {
        // Each sample is MSB first
        let raw = (u32::from(sample[0]) << 16) | (u32::from(sample[1]) << 8) | u32::from(sample[2]);
        channels[i] = sign_extend_24(raw);
    }
}
