//! Binary (de)serialisation of figures.
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! "SXBP"                     4-byte magic
//! major, minor, patch        3 version bytes
//! segment count              u32
//! segment records            count x u32: direction in the top 2 bits,
//!                            length in the low 30
//! ```

use crate::error::SpiralError;
use crate::figure::{Figure, Segment, MAX_LENGTH};
use crate::geom::Direction;

/// File magic identifying serialised figures.
pub const MAGIC: [u8; 4] = *b"SXBP";

/// Version of the wire format, independent of the crate version. Loaders
/// accept any buffer whose major matches.
pub const FORMAT_VERSION: FormatVersion = FormatVersion {
    major: 1,
    minor: 0,
    patch: 0,
};

const HEADER_SIZE: usize = 11;
const SEGMENT_SIZE: usize = 4;

/// A wire-format version triple, ordered newest-last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FormatVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

/// Serialise a figure to bytes.
pub fn dump(figure: &Figure) -> Result<Vec<u8>, SpiralError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(HEADER_SIZE + SEGMENT_SIZE * figure.len())?;
    buffer.extend_from_slice(&MAGIC);
    buffer.extend_from_slice(&[
        FORMAT_VERSION.major,
        FORMAT_VERSION.minor,
        FORMAT_VERSION.patch,
    ]);
    buffer.extend_from_slice(&(figure.len() as u32).to_be_bytes());
    for segment in figure.segments() {
        // the length mask keeps an overwide length from bleeding into the
        // direction bits
        let word = ((segment.direction as u32) << 30) | (segment.length & MAX_LENGTH);
        buffer.extend_from_slice(&word.to_be_bytes());
    }
    Ok(buffer)
}

/// Deserialise a figure from bytes produced by [`dump`].
///
/// Never partially succeeds: any failure leaves the caller without a
/// figure rather than with a half-parsed one.
pub fn load(bytes: &[u8]) -> Result<Figure, SpiralError> {
    if bytes.len() < HEADER_SIZE {
        return Err(SpiralError::BadHeaderSize);
    }
    if bytes[..4] != MAGIC {
        return Err(SpiralError::BadMagic);
    }
    if bytes[4] != FORMAT_VERSION.major {
        return Err(SpiralError::BadVersion);
    }
    let count = u32::from_be_bytes([bytes[7], bytes[8], bytes[9], bytes[10]]) as usize;
    if bytes.len() != HEADER_SIZE + SEGMENT_SIZE * count {
        return Err(SpiralError::BadDataSize);
    }
    let mut segments = Vec::new();
    segments.try_reserve_exact(count)?;
    for record in bytes[HEADER_SIZE..].chunks_exact(SEGMENT_SIZE) {
        let word = u32::from_be_bytes([record[0], record[1], record[2], record[3]]);
        segments.push(Segment {
            direction: Direction::from_index((word >> 30) as u8),
            length: word & MAX_LENGTH,
        });
    }
    Ok(Figure::from_segments(segments))
}
