//! Whole-file helpers for legacy single-stream formats
//!
//! SV4, SC4 and TD6 files are a single RLE stream followed by a 4 byte
//! checksum rather than a sequence of chunks.

use crate::checksum::{checksum, rotate_checksum, split_stored, TD6_CHECKSUM_OFFSET};
use crate::codec::rle;
use crate::{Result, SawyerError};

/// First scrambled byte of a decoded SC4 scenario
const SC4_SCRAMBLE_START: usize = 0x60018;

/// Last scrambled byte of a decoded SC4 scenario
const SC4_SCRAMBLE_END: usize = 0x1F8353;

const SC4_XOR_KEY: u8 = 0x9C;

fn body(buffer: &[u8]) -> Result<&[u8]> {
    split_stored(buffer)
        .map(|(body, _)| body)
        .ok_or(SawyerError::Truncated {
            needed: 4,
            available: buffer.len(),
        })
}

/// Decode an RCT1 saved game
///
/// # Errors
///
/// Returns error if the buffer has no checksum or the RLE stream is invalid
pub fn decode_sv4(buffer: &[u8], capacity: usize) -> Result<Vec<u8>> {
    rle::decode(body(buffer)?, capacity)
}

/// Decode an RCT1 scenario, undoing its scramble
///
/// # Errors
///
/// Returns error if the buffer has no checksum or the RLE stream is invalid
pub fn decode_sc4(buffer: &[u8], capacity: usize) -> Result<Vec<u8>> {
    let mut data = rle::decode(body(buffer)?, capacity)?;
    unscramble_sc4(&mut data);
    Ok(data)
}

fn unscramble_sc4(data: &mut [u8]) {
    if data.len() <= SC4_SCRAMBLE_START {
        return;
    }
    let end = SC4_SCRAMBLE_END.min(data.len() - 1);

    for b in &mut data[SC4_SCRAMBLE_START..=end] {
        *b ^= SC4_XOR_KEY;
    }

    for group in data[SC4_SCRAMBLE_START..=end].chunks_exact_mut(4) {
        group[1] = group[1].rotate_right(3);
        let code = u32::from_le_bytes([group[0], group[1], group[2], group[3]]);
        group.copy_from_slice(&code.rotate_left(9).to_le_bytes());
    }
}

/// Encode an RCT1 saved game, appending the additive checksum
#[must_use]
pub fn encode_sv4(data: &[u8]) -> Vec<u8> {
    let mut encoded = rle::encode(data);
    let sum = checksum(&encoded);
    encoded.extend_from_slice(&sum.to_le_bytes());
    encoded
}

/// Decode a track design
///
/// The checksum is not verified; see
/// [`validate_track_checksum`](crate::checksum::validate_track_checksum).
///
/// # Errors
///
/// Returns error if the buffer has no checksum or the RLE stream is invalid
pub fn decode_td6(buffer: &[u8], capacity: usize) -> Result<Vec<u8>> {
    rle::decode(body(buffer)?, capacity)
}

/// Encode a track design, appending its TD6 checksum
#[must_use]
pub fn encode_td6(data: &[u8]) -> Vec<u8> {
    let mut encoded = rle::encode(data);
    let sum = rotate_checksum(&encoded).wrapping_sub(TD6_CHECKSUM_OFFSET);
    encoded.extend_from_slice(&sum.to_le_bytes());
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::{track_checksum_variant, validate_checksum, TrackVariant};

    fn track() -> Vec<u8> {
        let mut data = vec![0u8; 64];
        data.extend(b"Mine Train Coaster".iter());
        data.extend(vec![0xFF; 20]);
        data
    }

    #[test]
    fn test_td6_roundtrip() {
        let data = track();
        let encoded = encode_td6(&data);

        assert_eq!(track_checksum_variant(&encoded), Some(TrackVariant::Td6));
        assert_eq!(decode_td6(&encoded, data.len()).unwrap(), data);
    }

    #[test]
    fn test_sv4_roundtrip() {
        let data = track();
        let encoded = encode_sv4(&data);

        assert!(validate_checksum(&encoded));
        assert_eq!(decode_sv4(&encoded, data.len()).unwrap(), data);
    }

    #[test]
    fn test_missing_checksum() {
        assert!(matches!(
            decode_sv4(&[0, 1], 16).unwrap_err(),
            SawyerError::Truncated {
                needed: 4,
                available: 2
            }
        ));
        assert!(decode_td6(&[], 16).is_err());
    }

    #[test]
    fn test_sc4_short_data_not_scrambled() {
        let data = track();
        let encoded = encode_sv4(&data);
        assert_eq!(decode_sc4(&encoded, data.len()).unwrap(), data);
    }

    #[test]
    fn test_sc4_unscramble() {
        let mut data = vec![0u8; SC4_SCRAMBLE_START + 8];
        data[SC4_SCRAMBLE_START..].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);

        let encoded = encode_sv4(&data);
        let decoded = decode_sc4(&encoded, data.len()).unwrap();
        assert_eq!(
            &decoded[SC4_SCRAMBLE_START..],
            &[0x31, 0x3B, 0xA7, 0x3F, 0x29, 0x33, 0xA7, 0x36]
        );
        assert!(decoded[..SC4_SCRAMBLE_START].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_sc4_partial_group_left_alone() {
        // the trailing two bytes are XORed but do not form a full group
        let mut data = vec![0u8; SC4_SCRAMBLE_START + 6];
        data[SC4_SCRAMBLE_START + 4] = 0x10;

        let decoded = decode_sc4(&encode_sv4(&data), data.len()).unwrap();
        assert_eq!(decoded[SC4_SCRAMBLE_START + 4], 0x10 ^ SC4_XOR_KEY);
        assert_eq!(decoded[SC4_SCRAMBLE_START + 5], SC4_XOR_KEY);
    }
}
