//! Configuration types for Sawyer

use serde::{Deserialize, Serialize};

use crate::{Result, SawyerError};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chunk codec settings
    #[serde(default)]
    pub codec: CodecConfig,
    /// Resource limits
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Settings consulted by the chunk write path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Allow RLE-based encodings when writing.
    ///
    /// When disabled, chunks requested as RLE or RLE-compressed are written
    /// uncompressed. Reading is never affected.
    #[serde(default = "default_use_rle")]
    pub use_rle: bool,
}

fn default_use_rle() -> bool {
    true
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { use_rle: true }
    }
}

impl CodecConfig {
    /// Configuration that writes every RLE-family chunk uncompressed
    #[must_use]
    pub fn without_rle() -> Self {
        Self { use_rle: false }
    }
}

/// Resource limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest decoded chunk accepted, in bytes
    pub max_chunk_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: 16 * 1024 * 1024, // 16 MB
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, parsed or validated
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Errors
    ///
    /// Returns error if the content cannot be parsed or validated
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| SawyerError::ConfigError(format!("Failed to parse config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_chunk_size == 0 {
            return Err(SawyerError::ConfigError(
                "max_chunk_size must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_parse() {
        let config_toml = r"
            [codec]
            use_rle = false

            [limits]
            max_chunk_size = 4096
        ";

        let config = Config::from_toml(config_toml).unwrap();
        assert!(!config.codec.use_rle);
        assert_eq!(config.limits.max_chunk_size, 4096);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.codec.use_rle);
        assert_eq!(config.limits.max_chunk_size, 16 * 1024 * 1024);

        let config = Config::from_toml("[codec]\n").unwrap();
        assert!(config.codec.use_rle);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[codec]\nuse_rle = false\n").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.codec, CodecConfig::without_rle());
    }

    #[test]
    fn test_invalid_config_zero_limit() {
        let config_toml = r"
            [limits]
            max_chunk_size = 0
        ";

        let err = Config::from_toml(config_toml).unwrap_err();
        assert!(matches!(err, SawyerError::ConfigError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/sawyer.toml")).unwrap_err();
        assert!(matches!(err, SawyerError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }
}
