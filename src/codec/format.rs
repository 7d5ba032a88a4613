//! Chunk header wire format

use bytemuck::{Pod, Zeroable};

use crate::{Result, SawyerError};

/// Size of a chunk header on disk
pub const CHUNK_HEADER_SIZE: usize = 5;

/// Encoding scheme of a single chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Encoding {
    /// Stored verbatim
    None = 0,
    /// Run-length encoded
    Rle = 1,
    /// Back-reference compressed, then run-length encoded
    RleCompressed = 2,
    /// Position-dependent bit rotation
    Rotate = 3,
}

impl Encoding {
    /// All encodings, in tag order
    pub const ALL: [Encoding; 4] = [
        Encoding::None,
        Encoding::Rle,
        Encoding::RleCompressed,
        Encoding::Rotate,
    ];

    /// Whether this encoding goes through the RLE pass
    #[must_use]
    pub fn uses_rle(self) -> bool {
        matches!(self, Encoding::Rle | Encoding::RleCompressed)
    }
}

impl TryFrom<u8> for Encoding {
    type Error = SawyerError;

    fn try_from(tag: u8) -> Result<Self> {
        match tag {
            0 => Ok(Encoding::None),
            1 => Ok(Encoding::Rle),
            2 => Ok(Encoding::RleCompressed),
            3 => Ok(Encoding::Rotate),
            other => Err(SawyerError::UnknownEncoding(other)),
        }
    }
}

/// Chunk header as laid out on disk (5 bytes, unaligned)
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
pub struct RawChunkHeader {
    /// Encoding tag
    pub encoding: u8,
    /// Encoded payload length, little-endian
    pub length: [u8; 4],
}

static_assertions::const_assert_eq!(std::mem::size_of::<RawChunkHeader>(), CHUNK_HEADER_SIZE);
static_assertions::const_assert_eq!(std::mem::align_of::<RawChunkHeader>(), 1);

/// Header preceding every chunk in a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Encoding of the payload
    pub encoding: Encoding,
    /// Length of the encoded payload in bytes
    pub length: u32,
}

impl ChunkHeader {
    /// Create a header
    #[must_use]
    pub fn new(encoding: Encoding, length: u32) -> Self {
        Self { encoding, length }
    }

    /// Parse a header from the start of `bytes`
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 5 bytes are available or the encoding tag
    /// is unknown
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = bytes
            .get(..CHUNK_HEADER_SIZE)
            .map(bytemuck::from_bytes::<RawChunkHeader>)
            .ok_or(SawyerError::Truncated {
                needed: CHUNK_HEADER_SIZE,
                available: bytes.len(),
            })?;

        Ok(Self {
            encoding: Encoding::try_from(raw.encoding)?,
            length: u32::from_le_bytes(raw.length),
        })
    }

    /// Serialize to the on-disk layout
    #[must_use]
    pub fn to_bytes(&self) -> [u8; CHUNK_HEADER_SIZE] {
        let raw = RawChunkHeader {
            encoding: self.encoding as u8,
            length: self.length.to_le_bytes(),
        };

        let mut out = [0u8; CHUNK_HEADER_SIZE];
        out.copy_from_slice(bytemuck::bytes_of(&raw));
        out
    }

    /// Declared payload length as a `usize`
    #[must_use]
    pub fn payload_len(&self) -> usize {
        self.length as usize
    }
}
