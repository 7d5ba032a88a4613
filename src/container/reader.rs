//! Container chunk reader

use tracing::{debug, warn};

use crate::codec::{self, ChunkHeader, CHUNK_HEADER_SIZE};
use crate::{Result, SawyerError};

/// Sequential reader over the chunks of an in-memory container
#[derive(Debug, Clone)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ChunkReader<'a> {
    /// Create a reader positioned at the first chunk
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Offset of the next chunk header
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left after the current position
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    /// Whether every byte has been consumed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining().is_empty()
    }

    /// Parse the next header without advancing
    ///
    /// # Errors
    ///
    /// Returns error if the header is truncated or its encoding is unknown
    pub fn peek_header(&self) -> Result<ChunkHeader> {
        ChunkHeader::from_bytes(self.remaining())
    }

    /// Header of the next chunk and its encoded payload, checked against the
    /// bytes actually present
    fn next_chunk(&self) -> Result<(ChunkHeader, &'a [u8])> {
        let header = self.peek_header().map_err(|e| {
            warn!("Invalid chunk header at offset {}: {e}", self.position);
            e
        })?;

        let payload = &self.remaining()[CHUNK_HEADER_SIZE..];
        if header.payload_len() > payload.len() {
            warn!(
                "Chunk at offset {} declares {} bytes, only {} remain",
                self.position,
                header.length,
                payload.len()
            );
            return Err(SawyerError::InvalidFormat(format!(
                "Chunk at offset {} extends beyond container: {} > {}",
                self.position,
                header.payload_len(),
                payload.len()
            )));
        }

        Ok((header, &payload[..header.payload_len()]))
    }

    /// Decode the next chunk and advance past it
    ///
    /// The reader does not move if decoding fails.
    ///
    /// # Errors
    ///
    /// Returns error if the header is invalid, the payload runs past the end
    /// of the container, or decoding fails
    pub fn read_chunk(&mut self, capacity: usize) -> Result<Vec<u8>> {
        let (header, payload) = self.next_chunk()?;
        let decoded = codec::read_chunk(&header, payload, capacity)?;

        debug!(
            "Read {:?} chunk at offset {}",
            header.encoding, self.position
        );
        self.position += CHUNK_HEADER_SIZE + payload.len();

        Ok(decoded)
    }

    /// Skip the next chunk without decoding it
    ///
    /// # Errors
    ///
    /// Returns error if the header is invalid or the payload runs past the end
    /// of the container
    pub fn skip_chunk(&mut self) -> Result<ChunkHeader> {
        let (header, payload) = self.next_chunk()?;
        self.position += CHUNK_HEADER_SIZE + payload.len();
        Ok(header)
    }
}
