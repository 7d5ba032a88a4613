//! Legacy RCT1 file detection
//!
//! An SV4/SC4 file ends with a stored rotate checksum. The signed difference
//! between the stored and recomputed checksum (the residual) identifies the
//! edition that wrote the file: its magnitude selects the edition and its
//! sign separates saved games (positive) from scenarios.

use std::ops::Range;

use tracing::debug;

use crate::checksum::{rotate_checksum, split_stored};

/// Container kind of a legacy RCT1 file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Saved game
    Sv4,
    /// Scenario
    Sc4,
}

impl FileKind {
    /// Packed value of the kind, as stored in bits 2-3 of [`FileType::to_bits`]
    #[must_use]
    pub fn bits(self) -> u8 {
        match self {
            FileKind::Sv4 => 1 << 2,
            FileKind::Sc4 => 2 << 2,
        }
    }
}

/// Edition of RCT1 that produced a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileVersion {
    /// Base game
    Rct1 = 0,
    /// With the Added Attractions expansion
    Rct1AddedAttractions = 1,
    /// With the Loopy Landscapes expansion
    Rct1LoopyLandscapes = 2,
}

/// Kind and edition of a recognized file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileType {
    /// Saved game or scenario
    pub kind: FileKind,
    /// Originating edition
    pub version: FileVersion,
}

impl FileType {
    /// Legacy packed form: edition in bits 0-1, kind in bits 2-3
    #[must_use]
    pub fn to_bits(self) -> u8 {
        self.kind.bits() | self.version as u8
    }
}

/// Outcome of file detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Residual fell into a known band
    Recognized(FileType),
    /// Residual matched no known band
    Unrecognized,
}

impl Classification {
    /// The detected file type, if any
    #[must_use]
    pub fn file_type(self) -> Option<FileType> {
        match self {
            Classification::Recognized(file_type) => Some(file_type),
            Classification::Unrecognized => None,
        }
    }

    /// Whether a known band matched
    #[must_use]
    pub fn is_recognized(self) -> bool {
        matches!(self, Classification::Recognized(_))
    }
}

/// A range of residual magnitudes and the edition it identifies
#[derive(Debug, Clone)]
pub struct ResidualBand {
    /// Residual magnitudes covered
    pub magnitude: Range<u32>,
    /// Edition reported for the band
    pub version: FileVersion,
}

/// Known residual bands, checked in order
pub const RESIDUAL_BANDS: [ResidualBand; 4] = [
    ResidualBand {
        magnitude: 108_000..110_000,
        version: FileVersion::Rct1,
    },
    ResidualBand {
        magnitude: 110_000..120_000,
        version: FileVersion::Rct1AddedAttractions,
    },
    ResidualBand {
        magnitude: 120_000..130_000,
        version: FileVersion::Rct1LoopyLandscapes,
    },
    // Community scenarios such as "RCTOA Acres" store a zero residual
    ResidualBand {
        magnitude: 0..1,
        version: FileVersion::Rct1LoopyLandscapes,
    },
];

/// Classify a residual, or the raw `game_version` field of a decoded save
#[must_use]
pub fn detect_rct1_version(residual: i32) -> Classification {
    let kind = if residual > 0 {
        FileKind::Sv4
    } else {
        FileKind::Sc4
    };
    let magnitude = residual.unsigned_abs();

    RESIDUAL_BANDS
        .iter()
        .find(|band| band.magnitude.contains(&magnitude))
        .map_or(Classification::Unrecognized, |band| {
            Classification::Recognized(FileType {
                kind,
                version: band.version,
            })
        })
}

/// Classify a complete SV4/SC4 buffer by its trailing checksum
///
/// Buffers too short to hold a checksum are unrecognized.
#[must_use]
pub fn detect_file_type(buffer: &[u8]) -> Classification {
    let Some((body, stored)) = split_stored(buffer) else {
        return Classification::Unrecognized;
    };

    let residual = stored.wrapping_sub(rotate_checksum(body)) as i32;
    let classification = detect_rct1_version(residual);

    debug!(
        "Checksum residual {} over {} bytes: {:?}",
        residual,
        body.len(),
        classification
    );

    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with_residual(residual: i32) -> Vec<u8> {
        let mut buffer: Vec<u8> = (0..2048u32).map(|i| (i * 13 % 256) as u8).collect();
        let stored = rotate_checksum(&buffer).wrapping_add(residual as u32);
        buffer.extend_from_slice(&stored.to_le_bytes());
        buffer
    }

    fn recognized(kind: FileKind, version: FileVersion) -> Classification {
        Classification::Recognized(FileType { kind, version })
    }

    #[test]
    fn test_known_bands() {
        let cases = [
            (108_000, FileVersion::Rct1),
            (109_999, FileVersion::Rct1),
            (110_000, FileVersion::Rct1AddedAttractions),
            (119_999, FileVersion::Rct1AddedAttractions),
            (120_000, FileVersion::Rct1LoopyLandscapes),
            (129_999, FileVersion::Rct1LoopyLandscapes),
        ];

        for (residual, version) in cases {
            assert_eq!(
                detect_file_type(&buffer_with_residual(residual)),
                recognized(FileKind::Sv4, version),
                "residual {residual}"
            );
            assert_eq!(
                detect_file_type(&buffer_with_residual(-residual)),
                recognized(FileKind::Sc4, version),
                "residual -{residual}"
            );
        }
    }

    #[test]
    fn test_zero_residual() {
        assert_eq!(
            detect_file_type(&buffer_with_residual(0)),
            recognized(FileKind::Sc4, FileVersion::Rct1LoopyLandscapes)
        );
    }

    #[test]
    fn test_unrecognized() {
        for residual in [1, -1, 107_999, 130_000, -130_000, i32::MAX, i32::MIN] {
            assert_eq!(
                detect_file_type(&buffer_with_residual(residual)),
                Classification::Unrecognized,
                "residual {residual}"
            );
        }
    }

    #[test]
    fn test_short_buffer() {
        assert_eq!(detect_file_type(&[]), Classification::Unrecognized);
        assert_eq!(detect_file_type(&[1, 2, 3]), Classification::Unrecognized);
    }

    #[test]
    fn test_raw_game_version() {
        assert_eq!(
            detect_rct1_version(120_000).file_type(),
            Some(FileType {
                kind: FileKind::Sv4,
                version: FileVersion::Rct1LoopyLandscapes
            })
        );
        assert!(!detect_rct1_version(5).is_recognized());
    }

    #[test]
    fn test_packed_bits() {
        let sv4 = FileType {
            kind: FileKind::Sv4,
            version: FileVersion::Rct1AddedAttractions,
        };
        assert_eq!(sv4.to_bits(), 0b0101);

        let sc4 = FileType {
            kind: FileKind::Sc4,
            version: FileVersion::Rct1LoopyLandscapes,
        };
        assert_eq!(sc4.to_bits(), 0b1010);
    }
}
