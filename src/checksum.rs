//! Checksums
//!
//! Two unrelated algorithms share the name. The additive [`checksum`] guards
//! whole containers; the rotate-based [`rotate_checksum`] fingerprints legacy
//! track designs and RCT1 saves.

/// Size of a trailing stored checksum
pub const CHECKSUM_SIZE: usize = 4;

/// Subtracted from the rotate checksum of a TD6 track design
pub const TD6_CHECKSUM_OFFSET: u32 = 0x1D4C1;

/// Subtracted from the rotate checksum of a TD4 track design
pub const TD4_CHECKSUM_OFFSET: u32 = 0x1A67C;

/// Alternate TD4 offset, written by some RCT1 releases
pub const TD4_ALTERNATE_CHECKSUM_OFFSET: u32 = 0x1A650;

/// Known track design sub-versions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackVariant {
    /// RCT2 track design
    Td6,
    /// RCT1 track design
    Td4,
    /// RCT1 track design, alternate checksum
    Td4Alternate,
}

/// Magic offset for each track design sub-version, tried in order
pub const TRACK_CHECKSUM_OFFSETS: [(TrackVariant, u32); 3] = [
    (TrackVariant::Td6, TD6_CHECKSUM_OFFSET),
    (TrackVariant::Td4, TD4_CHECKSUM_OFFSET),
    (TrackVariant::Td4Alternate, TD4_ALTERNATE_CHECKSUM_OFFSET),
];

/// Sum of all bytes, wrapping at 32 bits
#[must_use]
pub fn checksum(buffer: &[u8]) -> u32 {
    buffer
        .iter()
        .fold(0u32, |acc, &b| acc.wrapping_add(u32::from(b)))
}

/// Rotate-based running checksum
///
/// Each byte is added into the low byte of the accumulator (without carry),
/// then the whole accumulator is rotated left by 3 bits.
#[must_use]
pub fn rotate_checksum(buffer: &[u8]) -> u32 {
    buffer.iter().fold(0u32, |acc, &b| {
        let low = (acc as u8).wrapping_add(b);
        ((acc & 0xFFFF_FF00) | u32::from(low)).rotate_left(3)
    })
}

/// Split a buffer into its body and trailing little-endian checksum
#[must_use]
pub fn split_stored(buffer: &[u8]) -> Option<(&[u8], u32)> {
    let body_len = buffer.len().checked_sub(CHECKSUM_SIZE)?;
    let (body, tail) = buffer.split_at(body_len);
    let stored = u32::from_le_bytes(tail.try_into().ok()?);
    Some((body, stored))
}

/// Whether the trailing 4 bytes hold the additive checksum of the rest
#[must_use]
pub fn validate_checksum(buffer: &[u8]) -> bool {
    split_stored(buffer).is_some_and(|(body, stored)| checksum(body) == stored)
}

/// Which track design sub-version the trailing checksum matches, if any
#[must_use]
pub fn track_checksum_variant(buffer: &[u8]) -> Option<TrackVariant> {
    let (body, stored) = split_stored(buffer)?;
    let computed = rotate_checksum(body);

    TRACK_CHECKSUM_OFFSETS
        .iter()
        .find(|(_, offset)| computed.wrapping_sub(*offset) == stored)
        .map(|(variant, _)| *variant)
}

/// Whether the trailing checksum matches any known track design sub-version
#[must_use]
pub fn validate_track_checksum(buffer: &[u8]) -> bool {
    track_checksum_variant(buffer).is_some()
}
