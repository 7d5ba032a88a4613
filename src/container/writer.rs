//! Container chunk writer

use tracing::debug;

use crate::checksum::checksum;
use crate::codec::{self, ChunkHeader, Encoding, CHUNK_HEADER_SIZE};
use crate::config::CodecConfig;

/// Writer accumulating encoded chunks into an in-memory container
#[derive(Debug, Clone)]
pub struct ChunkWriter {
    buffer: Vec<u8>,
    config: CodecConfig,
    chunk_count: usize,
}

impl ChunkWriter {
    /// Create an empty container
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        Self {
            buffer: Vec::new(),
            config,
            chunk_count: 0,
        }
    }

    /// Encode `payload` and append it with its header
    ///
    /// Returns the header written, which may carry a different encoding than
    /// requested if RLE is disabled.
    pub fn write_chunk(&mut self, encoding: Encoding, payload: &[u8]) -> ChunkHeader {
        let (header, encoded) =
            codec::write_chunk(ChunkHeader::new(encoding, 0), payload, &self.config);

        self.buffer.reserve(CHUNK_HEADER_SIZE + encoded.len());
        self.buffer.extend_from_slice(&header.to_bytes());
        self.buffer.extend_from_slice(&encoded);
        self.chunk_count += 1;

        header
    }

    /// Bytes written so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of chunks written
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Finish the container, appending the additive checksum of every byte
    #[must_use]
    pub fn finish(mut self) -> Vec<u8> {
        let sum = checksum(&self.buffer);
        self.buffer.extend_from_slice(&sum.to_le_bytes());

        debug!(
            "Finished container: {} chunks, {} bytes, checksum {:#010x}",
            self.chunk_count,
            self.buffer.len(),
            sum
        );

        self.buffer
    }

    /// Finish the container without a trailing checksum
    #[must_use]
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}
