//! Error types for configuration loading.
//!
//! This module defines all errors that can occur while locating, parsing,
//! migrating and persisting `gen.yaml`.

use semver::Version;
use thiserror::Error;

/// Error returned by a language upgrade hook.
pub type UpgradeError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Filesystem failure while reading or writing the config file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// `configVersion` is present but is not a semantic version.
    #[error("Malformed config version '{version}': {reason}")]
    MalformedVersion { version: String, reason: String },

    /// `configVersion` is newer than this build understands.
    #[error("Config version {found} is newer than the supported version {supported}; upgrade the tool to load it")]
    UnsupportedVersion { found: Version, supported: Version },

    /// The file is not well-formed or does not match the schema.
    #[error("Malformed config document: {reason}")]
    MalformedDocument { reason: String },

    /// A migration step could not build its successor document.
    #[error("Failed to migrate config from {from} to {to}: {source}")]
    Migration {
        from: Version,
        to: Version,
        #[source]
        source: MigrationError,
    },

    /// A language upgrade hook rejected the language's payload.
    #[error("Failed to upgrade {language} config from {from}: {source}")]
    LanguageUpgrade {
        language: String,
        from: Version,
        #[source]
        source: UpgradeError,
    },

    /// Failed to encode the document before writing it.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl ConfigError {
    /// Creates a malformed document error.
    pub fn malformed_document(reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            reason: reason.into(),
        }
    }

    /// Creates a malformed version error.
    pub fn malformed_version(version: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedVersion {
            version: version.into(),
            reason: reason.into(),
        }
    }
}

/// Failure of a single migration step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// A field the step depends on has an unusable structure.
    #[error("field '{field}' is malformed: {reason}")]
    MalformedDocument { field: String, reason: String },
}

impl MigrationError {
    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_version_message_asks_for_upgrade() {
        let err = ConfigError::UnsupportedVersion {
            found: Version::new(9, 0, 0),
            supported: Version::new(2, 0, 0),
        };
        let msg = err.to_string();
        assert!(msg.contains("9.0.0"));
        assert!(msg.contains("2.0.0"));
        assert!(msg.contains("upgrade the tool"));
    }

    #[test]
    fn migration_error_names_version_pair() {
        let err = ConfigError::Migration {
            from: Version::new(0, 0, 0),
            to: Version::new(1, 0, 0),
            source: MigrationError::malformed("generate", "expected a mapping"),
        };
        let msg = err.to_string();
        assert!(msg.contains("0.0.0"));
        assert!(msg.contains("1.0.0"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn io_errors_are_passed_through() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ConfigError::from(io);
        match err {
            ConfigError::Io(inner) => assert_eq!(inner.kind(), std::io::ErrorKind::PermissionDenied),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}
