//! Error types for BrainBloom.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every BrainBloom crate.
///
/// Validation rejections of chat input are *not* errors (they are reported as
/// `SubmitOutcome::Ignored`); this type covers collaborator failures, storage
/// problems and invalid arguments to explicit operations such as mood entry.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum BloomError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input to an explicit operation
    #[error("Validation error: {0}")]
    Validation(String),

    /// A collaborator (reply service, data provider) failed
    #[error("Collaborator error: {0}")]
    Collaborator(String),

    /// A collaborator did not answer within the configured time
    #[error("Timed out after {secs}s waiting for {operation}")]
    Timeout { operation: String, secs: u64 },
}

impl BloomError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Collaborator error
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator(message.into())
    }

    /// Creates a Timeout error
    pub fn timeout(operation: impl Into<String>, secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            secs,
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a collaborator failure (including timeouts)
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::Collaborator(_) | Self::Timeout { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for BloomError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for BloomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BloomError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for BloomError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, BloomError>`.
pub type Result<T> = std::result::Result<T, BloomError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_counts_as_collaborator_failure() {
        let err = BloomError::timeout("agent reply", 30);
        assert!(err.is_collaborator());
        assert_eq!(err.to_string(), "Timed out after 30s waiting for agent reply");
    }

    #[test]
    fn test_io_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BloomError = io.into();
        match err {
            BloomError::Io { message } => assert!(message.contains("NotFound")),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_predicates_partition_variants() {
        let cases = [
            (BloomError::io("disk"), false, false, false),
            (
                BloomError::Serialization {
                    format: "TOML".to_string(),
                    message: "bad".to_string(),
                },
                false,
                false,
                true,
            ),
            (BloomError::config("bad interval"), false, false, false),
            (BloomError::validation("score"), true, false, false),
            (BloomError::collaborator("offline"), false, true, false),
            (BloomError::timeout("agent reply", 5), false, true, false),
        ];
        for (err, validation, collaborator, serialization) in cases {
            // Exhaustive so a new variant has to be added here.
            match &err {
                BloomError::Io { .. }
                | BloomError::Serialization { .. }
                | BloomError::Config(_)
                | BloomError::Validation(_)
                | BloomError::Collaborator(_)
                | BloomError::Timeout { .. } => {}
            }
            assert_eq!(err.is_validation(), validation, "{err}");
            assert_eq!(err.is_collaborator(), collaborator, "{err}");
            assert_eq!(err.is_serialization(), serialization, "{err}");
        }
    }

    #[test]
    fn test_json_conversion_is_serialization() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: BloomError = parse.into();
        assert!(err.is_serialization());
    }
}
