//! Stream configuration

use matstream_core::DataFormat;

/// Options that control how a [`MatStream`](crate::MatStream) writes and validates records
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamConfig {
    /// Data format tag written into new headers
    pub data_format: DataFormat,
    /// Reject records whose data format differs from `data_format`
    pub strict_format: bool,
    /// Call `fsync` after every matrix append
    pub sync_on_append: bool,
}

impl StreamConfig {
    /// Set the data format tag for new headers
    pub fn with_data_format(mut self, data_format: DataFormat) -> Self {
        self.data_format = data_format;
        self
    }

    /// Enable or disable data format checks on load
    pub fn with_strict_format(mut self, strict: bool) -> Self {
        self.strict_format = strict;
        self
    }

    /// Enable or disable `fsync` after appends
    pub fn with_sync_on_append(mut self, sync: bool) -> Self {
        self.sync_on_append = sync;
        self
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            data_format: DataFormat::native(),
            strict_format: true,
            sync_on_append: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StreamConfig::default();
        assert_eq!(config.data_format, DataFormat::native());
        assert!(config.strict_format);
        assert!(!config.sync_on_append);
    }

    #[test]
    fn test_builder() {
        let config = StreamConfig::default()
            .with_data_format(DataFormat::IeeeBigEndian)
            .with_strict_format(false)
            .with_sync_on_append(true);
        assert_eq!(config.data_format, DataFormat::IeeeBigEndian);
        assert!(!config.strict_format);
        assert!(config.sync_on_append);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_config_from_json() {
        let config: StreamConfig = serde_json::from_str(r#"{"strict_format": false}"#).unwrap();
        assert!(!config.strict_format);
        assert_eq!(config.data_format, DataFormat::native());
        assert!(!config.sync_on_append);
    }
}
