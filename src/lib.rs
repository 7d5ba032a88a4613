//! Sawyer - chunk codec for legacy park save files
//!
//! Encodes and decodes the chunks of Sawyer containers (saved games,
//! scenarios, track designs), computes their checksums and identifies which
//! RCT1 edition produced an SV4/SC4 file.
//!
//! ```
//! use sawyer::{read_chunk, write_chunk, ChunkHeader, CodecConfig, Encoding};
//!
//! let park = b"Forest Frontiers".repeat(4);
//! let (header, encoded) = write_chunk(
//!     ChunkHeader::new(Encoding::RleCompressed, 0),
//!     &park,
//!     &CodecConfig::default(),
//! );
//! let decoded = read_chunk(&header, &encoded, park.len())?;
//! assert_eq!(decoded, park);
//! # Ok::<(), sawyer::SawyerError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::cargo)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::multiple_crate_versions
)]

pub mod checksum;
pub mod codec;
pub mod config;
pub mod container;
pub mod detect;
pub mod error;
pub mod legacy;

pub use checksum::{checksum, validate_track_checksum};
pub use codec::{read_chunk, write_chunk, ChunkHeader, Encoding};
pub use config::{CodecConfig, Config};
pub use detect::{detect_file_type, Classification, FileKind, FileType, FileVersion};
pub use error::{Result, SawyerError};
