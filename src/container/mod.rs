//! In-memory chunk containers
//!
//! A container is a sequence of `[header][encoded payload]` records,
//! optionally followed by a 4 byte additive checksum of everything before it.

mod reader;
mod writer;

pub use reader::ChunkReader;
pub use writer::ChunkWriter;

use crate::checksum::{split_stored, validate_checksum};
use crate::{Result, SawyerError};

/// Strip and verify the trailing checksum of a finished container
///
/// # Errors
///
/// Returns error if the buffer is too short or the checksum does not match
pub fn verified_body(container: &[u8]) -> Result<&[u8]> {
    if !validate_checksum(container) {
        return Err(SawyerError::InvalidFormat(format!(
            "Container checksum mismatch over {} bytes",
            container.len()
        )));
    }

    split_stored(container)
        .map(|(body, _)| body)
        .ok_or_else(|| SawyerError::InvalidFormat("Container too small".to_string()))
}
