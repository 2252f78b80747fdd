//! Storage payload adapter
//!
//! The archive stores opaque bytes plus a MIME type and tracks creation and
//! modification times itself. [`StoredDocument`] gives any document that
//! shape without the archive knowing which variant it holds.

use chrono::{DateTime, Utc};

use crate::document::Document;
use crate::error::{MetadataError, Result};

/// MIME type of every serialized document
pub const MIME_TYPE: &str = "application/json";

/// Timestamp reported by documents that predate storage-level tracking
pub const UNTRACKED: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

/// What the storage layer needs from a payload
pub trait StoragePayload {
    fn mime_type(&self) -> &str;

    /// Serialized bytes, stamped with the current schema version
    fn payload(&self) -> Result<Vec<u8>>;

    fn created(&self) -> DateTime<Utc>;

    fn modified(&self) -> DateTime<Utc>;
}

/// A document on its way to or from storage
#[derive(Debug, Clone, PartialEq)]
pub enum StoredDocument<D> {
    /// Timestamps supplied by the storage layer
    WithTimestamps {
        document: D,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    },
    /// Older records with no tracked timestamps
    WithoutTimestamps { document: D },
}

impl<D: Document> StoredDocument<D> {
    /// Wrap a document with the timestamps storage holds for it
    pub fn with_timestamps(document: D, created: DateTime<Utc>, modified: DateTime<Utc>) -> Self {
        StoredDocument::WithTimestamps {
            document,
            created,
            modified,
        }
    }

    /// Wrap a document that has no storage timestamps
    pub fn untracked(document: D) -> Self {
        StoredDocument::WithoutTimestamps { document }
    }

    pub fn document(&self) -> &D {
        match self {
            StoredDocument::WithTimestamps { document, .. } => document,
            StoredDocument::WithoutTimestamps { document } => document,
        }
    }

    pub fn document_mut(&mut self) -> &mut D {
        match self {
            StoredDocument::WithTimestamps { document, .. } => document,
            StoredDocument::WithoutTimestamps { document } => document,
        }
    }

    pub fn into_document(self) -> D {
        match self {
            StoredDocument::WithTimestamps { document, .. } => document,
            StoredDocument::WithoutTimestamps { document } => document,
        }
    }

    pub fn is_tracked(&self) -> bool {
        matches!(self, StoredDocument::WithTimestamps { .. })
    }
}

impl<D: Document> StoragePayload for StoredDocument<D> {
    fn mime_type(&self) -> &str {
        MIME_TYPE
    }

    fn payload(&self) -> Result<Vec<u8>> {
        let mut stamped = self.document().clone();
        stamped.stamp_version();
        serde_json::to_vec(&stamped).map_err(MetadataError::Encode)
    }

    fn created(&self) -> DateTime<Utc> {
        match self {
            StoredDocument::WithTimestamps { created, .. } => *created,
            StoredDocument::WithoutTimestamps { .. } => UNTRACKED,
        }
    }

    fn modified(&self) -> DateTime<Utc> {
        match self {
            StoredDocument::WithTimestamps { modified, .. } => *modified,
            StoredDocument::WithoutTimestamps { .. } => UNTRACKED,
        }
    }
}
