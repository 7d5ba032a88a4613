//! Back-reference compression used by RLE-compressed chunks
//!
//! A control byte of `0xFF` escapes one literal byte. Any other control byte
//! packs a copy count (low 3 bits, biased by one) and a backward distance
//! (high 5 bits, stored as `32 - distance`).

use super::ensure_capacity;
use crate::{Result, SawyerError};

/// Control byte announcing a literal
pub const LITERAL: u8 = 0xFF;

/// Furthest distance a back-reference can reach
pub const WINDOW: usize = 32;

/// Longest copy a single back-reference can express
pub const MAX_COPY: usize = 8;

/// Expand back-references, never producing more than `capacity` bytes
///
/// Copies run byte by byte, so a reference may overlap the bytes it produces.
///
/// # Errors
///
/// Returns [`SawyerError::CapacityExceeded`] if the output would outgrow
/// `capacity`, [`SawyerError::InvalidBackReference`] if a copy reaches before
/// the start of the output, or [`SawyerError::Truncated`] if a literal escape
/// is missing its byte
pub fn decode(src: &[u8], capacity: usize) -> Result<Vec<u8>> {
    let mut dst = Vec::with_capacity(capacity.min(src.len().saturating_mul(MAX_COPY)));
    let mut i = 0;

    while i < src.len() {
        let control = src[i];
        i += 1;

        if control == LITERAL {
            let value = *src.get(i).ok_or(SawyerError::Truncated {
                needed: i + 1,
                available: src.len(),
            })?;
            i += 1;

            ensure_capacity(capacity, dst.len() + 1)?;
            dst.push(value);
        } else {
            let count = usize::from(control & 7) + 1;
            let offset = WINDOW - usize::from(control >> 3);
            let position = dst.len();

            if offset > position {
                return Err(SawyerError::InvalidBackReference { offset, position });
            }
            ensure_capacity(capacity, position + count)?;

            let start = position - offset;
            for k in 0..count {
                let value = dst[start + k];
                dst.push(value);
            }
        }
    }

    Ok(dst)
}

/// Replace repeated sequences with back-references into the trailing window
///
/// For each position the longest earlier match within [`WINDOW`] bytes is
/// used, capped at [`MAX_COPY`]. A match never extends into the bytes it is
/// replacing, so `(distance 1, count 8)`, which would collide with
/// [`LITERAL`], is never produced.
#[must_use]
pub fn encode(src: &[u8]) -> Vec<u8> {
    let Some(&first) = src.first() else {
        return Vec::new();
    };

    let mut dst = Vec::with_capacity(src.len() * 2);
    dst.push(LITERAL);
    dst.push(first);

    let mut i = 1;
    while i < src.len() {
        let (index, count) = longest_match(src, i);

        if count == 0 {
            dst.push(LITERAL);
            dst.push(src[i]);
            i += 1;
        } else {
            let distance = i - index;
            dst.push(((count - 1) | ((WINDOW - distance) << 3)) as u8);
            i += count;
        }
    }

    dst
}

/// Earliest longest match for `src[pos..]` within the window, as
/// `(start index, length)`
fn longest_match(src: &[u8], pos: usize) -> (usize, usize) {
    let mut best = (0, 0);

    for candidate in pos.saturating_sub(WINDOW)..pos {
        let limit = MAX_COPY.min(pos - candidate).min(src.len() - pos);
        let count = src[candidate..candidate + limit]
            .iter()
            .zip(&src[pos..])
            .take_while(|(a, b)| a == b)
            .count();

        if count > best.1 {
            best = (candidate, count);
            if count == MAX_COPY {
                break;
            }
        }
    }

    best
}
