//! Chunk codec
//!
//! Encodes and decodes the payload of a single container chunk. Writing an
//! RLE-compressed chunk applies back-reference compression first and RLE over
//! the result; reading reverses the two passes in the opposite order.

mod format;
pub mod repeat;
pub mod rle;
pub mod rotate;

pub use format::{ChunkHeader, Encoding, RawChunkHeader, CHUNK_HEADER_SIZE};

use tracing::debug;

use crate::config::CodecConfig;
use crate::{Result, SawyerError};

/// Fail with [`SawyerError::CapacityExceeded`] if `required` outgrows `capacity`
#[inline]
pub(crate) fn ensure_capacity(capacity: usize, required: usize) -> Result<()> {
    if required > capacity {
        return Err(SawyerError::CapacityExceeded { capacity, required });
    }
    Ok(())
}

/// Decode the payload of a chunk
///
/// Only the first `header.length` bytes of `src` are consumed. The decoded
/// output never exceeds `capacity` bytes.
///
/// # Errors
///
/// Returns error if `src` is shorter than the declared length, the decoded
/// data would exceed `capacity`, or the payload is malformed
pub fn read_chunk(header: &ChunkHeader, src: &[u8], capacity: usize) -> Result<Vec<u8>> {
    let length = header.payload_len();
    let payload = src.get(..length).ok_or(SawyerError::Truncated {
        needed: length,
        available: src.len(),
    })?;

    let decoded = match header.encoding {
        Encoding::None => {
            ensure_capacity(capacity, length)?;
            payload.to_vec()
        }
        Encoding::Rle => rle::decode(payload, capacity)?,
        Encoding::RleCompressed => {
            // A back-reference stream is at most two bytes per output byte
            let expanded = rle::decode(payload, capacity.saturating_mul(2))?;
            repeat::decode(&expanded, capacity)?
        }
        Encoding::Rotate => {
            ensure_capacity(capacity, length)?;
            rotate::decode(payload)
        }
    };

    debug!(
        "Decoded {:?} chunk: {} -> {} bytes",
        header.encoding,
        length,
        decoded.len()
    );

    Ok(decoded)
}

/// Encode a chunk payload
///
/// Returns the header actually written, with the real encoding and encoded
/// length, alongside the encoded bytes. When `config.use_rle` is off, RLE and
/// RLE-compressed chunks are written uncompressed.
///
/// # Panics
///
/// Panics if the encoded payload is longer than `u32::MAX` bytes
#[must_use]
pub fn write_chunk(
    header: ChunkHeader,
    src: &[u8],
    config: &CodecConfig,
) -> (ChunkHeader, Vec<u8>) {
    let mut encoding = header.encoding;
    if !config.use_rle && encoding.uses_rle() {
        debug!("RLE disabled, writing {:?} chunk uncompressed", encoding);
        encoding = Encoding::None;
    }

    let encoded = match encoding {
        Encoding::None => src.to_vec(),
        Encoding::Rle => rle::encode(src),
        Encoding::RleCompressed => rle::encode(&repeat::encode(src)),
        Encoding::Rotate => rotate::encode(src),
    };

    let length = u32::try_from(encoded.len()).expect("chunk payload exceeds u32::MAX bytes");

    debug!(
        "Encoded {:?} chunk: {} -> {} bytes",
        encoding,
        src.len(),
        encoded.len()
    );

    (ChunkHeader { encoding, length }, encoded)
}
