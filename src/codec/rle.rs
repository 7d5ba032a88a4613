//! Run-length encoding
//!
//! Each run starts with a control byte. With the high bit set the run repeats
//! the following byte `257 - control` times; otherwise `control + 1` literal
//! bytes follow.

use super::ensure_capacity;
use crate::{Result, SawyerError};

/// Longest repeat run the encoder emits
pub const MAX_REPEAT_RUN: usize = 125;

/// Longest literal run the encoder emits
pub const MAX_LITERAL_RUN: usize = 128;

/// Decode an RLE payload, never producing more than `capacity` bytes
///
/// # Errors
///
/// Returns [`SawyerError::CapacityExceeded`] if the output would outgrow
/// `capacity`, or [`SawyerError::Truncated`] if a run is cut short
pub fn decode(src: &[u8], capacity: usize) -> Result<Vec<u8>> {
    let mut dst = Vec::with_capacity(capacity.min(src.len().saturating_mul(2)));
    let mut i = 0;

    while i < src.len() {
        let control = src[i];
        i += 1;

        if control & 0x80 != 0 {
            let count = 257 - usize::from(control);
            let value = *src.get(i).ok_or(SawyerError::Truncated {
                needed: i + 1,
                available: src.len(),
            })?;
            i += 1;

            ensure_capacity(capacity, dst.len() + count)?;
            dst.resize(dst.len() + count, value);
        } else {
            let count = usize::from(control) + 1;
            let run = src.get(i..i + count).ok_or(SawyerError::Truncated {
                needed: i + count,
                available: src.len(),
            })?;
            i += count;

            ensure_capacity(capacity, dst.len() + count)?;
            dst.extend_from_slice(run);
        }
    }

    Ok(dst)
}

/// Encode `src` with the greedy run-length scheme
///
/// A repeat run is started as soon as two adjacent bytes match, even while a
/// literal run is pending.
#[must_use]
pub fn encode(src: &[u8]) -> Vec<u8> {
    let mut dst = Vec::with_capacity(src.len() + src.len() / MAX_LITERAL_RUN + 1);
    let mut literal_start = 0;
    let mut i = 0;

    while i < src.len() {
        if i + 1 < src.len() && src[i] == src[i + 1] {
            flush_literal(&mut dst, &src[literal_start..i]);

            let value = src[i];
            let count = src[i..]
                .iter()
                .take(MAX_REPEAT_RUN)
                .take_while(|&&b| b == value)
                .count();

            dst.push((257 - count) as u8);
            dst.push(value);

            i += count;
            literal_start = i;
        } else {
            i += 1;
            if i - literal_start == MAX_LITERAL_RUN {
                flush_literal(&mut dst, &src[literal_start..i]);
                literal_start = i;
            }
        }
    }

    flush_literal(&mut dst, &src[literal_start..]);
    dst
}

fn flush_literal(dst: &mut Vec<u8>, run: &[u8]) {
    if run.is_empty() {
        return;
    }

    debug_assert!(run.len() <= MAX_LITERAL_RUN);
    dst.push((run.len() - 1) as u8);
    dst.extend_from_slice(run);
}
