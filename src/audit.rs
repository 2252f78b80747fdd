//! Field-level audit trail
//!
//! Audit records are append-only log entries rather than versioned
//! documents, so they decode without a version gate.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MetadataError, Result};

/// One field change on one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// Actor that made the change
    pub who: String,
    /// Object identifier of the changed document
    pub oid: String,
    pub namespace: String,
    pub field_name: String,
    pub before: String,
    pub after: String,
    pub event_time: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(
        who: impl Into<String>,
        oid: impl Into<String>,
        namespace: impl Into<String>,
        field_name: impl Into<String>,
        before: impl Into<String>,
        after: impl Into<String>,
        event_time: DateTime<Utc>,
    ) -> Self {
        Self {
            who: who.into(),
            oid: oid.into(),
            namespace: namespace.into(),
            field_name: field_name.into(),
            before: before.into(),
            after: after.into(),
            event_time,
        }
    }
}

impl fmt::Display for AuditRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}/{} {}: '{}' -> '{}'",
            self.event_time.to_rfc3339(),
            self.who,
            self.namespace,
            self.oid,
            self.field_name,
            self.before,
            self.after
        )
    }
}

/// Decode an audit trail, preserving input order.
///
/// An empty buffer is an empty trail.
pub fn load_audit_trail(bytes: &[u8]) -> Result<Vec<AuditRecord>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(bytes).map_err(MetadataError::Decode)
}

/// The records for one document, in trail order
pub fn history_for<'a>(records: &'a [AuditRecord], oid: &str) -> Vec<&'a AuditRecord> {
    records.iter().filter(|r| r.oid == oid).collect()
}
