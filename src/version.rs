//! Schema version tag and load gate
//!
//! Every versioned document carries a top-level `version` string. Only one
//! generation is accepted at a time: adding or removing a field does not need
//! a bump, renaming or retyping one does.

use serde::Deserialize;
use tracing::debug;

use crate::error::{MetadataError, Result};

/// The schema generation written and accepted by this crate
pub const SCHEMA_VERSION: &str = "1";

/// Only the tag; every other field of the document is ignored
#[derive(Debug, Deserialize)]
struct VersionProbe {
    version: String,
}

/// Decode just the version tag from raw document bytes
pub fn read_version(bytes: &[u8]) -> Result<String> {
    let probe: VersionProbe = serde_json::from_slice(bytes).map_err(MetadataError::Decode)?;
    Ok(probe.version)
}

/// Check the bytes carry the current schema version
pub fn check_version(bytes: &[u8]) -> Result<()> {
    check_version_against(bytes, SCHEMA_VERSION)
}

/// Check the bytes carry exactly `expected`
pub fn check_version_against(bytes: &[u8], expected: &str) -> Result<()> {
    let found = read_version(bytes)?;
    if found != expected {
        debug!(%found, %expected, "rejecting document from another schema generation");
        return Err(MetadataError::SchemaMismatch {
            expected: expected.to_string(),
            found,
        });
    }
    Ok(())
}
