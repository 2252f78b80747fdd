//! Error types for metadata documents

use thiserror::Error;

/// Result type for metadata operations
pub type Result<T> = std::result::Result<T, MetadataError>;

/// Metadata load, store and migration errors
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Schema version mismatch: expected {expected}, got {found}")]
    SchemaMismatch { expected: String, found: String },

    #[error("Failed to decode document")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode document")]
    Encode(#[source] serde_json::Error),

    #[error("No migration registered for {kind} documents at schema version {from}")]
    NoMigration { kind: String, from: String },

    #[error("Migration from schema version {from} failed: {reason}")]
    Migration { from: String, reason: String },

    #[error("format {0} not supported")]
    UnsupportedFormat(String),

    #[error("document kind {0} not supported")]
    UnsupportedKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetadataError {
    /// True when the bytes were well formed but written by another schema generation
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, MetadataError::SchemaMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_decode_message_leaves_cause_to_source() {
        let cause = serde_json::from_slice::<serde_json::Value>(b"not json").unwrap_err();
        let cause_text = cause.to_string();
        let err = MetadataError::Decode(cause);
        assert_eq!(err.to_string(), "Failed to decode document");
        assert_eq!(err.source().unwrap().to_string(), cause_text);
    }
}
