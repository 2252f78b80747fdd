//! Upgrading documents written by earlier schema generations
//!
//! The loader in [`document`](crate::document) rejects anything that is not
//! current. Callers that need to read older records opt in here: the stored
//! JSON is walked through the per-kind migration table one generation at a
//! time until it reaches [`SCHEMA_VERSION`], then decoded through the regular
//! loader. A record either upgrades completely or not at all.

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::document::{load, Versioned, Work, WorkKind};
use crate::error::{MetadataError, Result};
use crate::etd::EtdWork;
use crate::oa::OaWork;
use crate::version::SCHEMA_VERSION;

/// Tag assumed for records written before documents carried a version
pub const LEGACY_VERSION: &str = "0";

/// One upgrade step between adjacent generations
#[derive(Clone, Copy)]
pub struct Migration {
    pub from: &'static str,
    pub to: &'static str,
    /// Rewrites the document in place; the version tag is set afterwards
    pub apply: fn(&mut Value) -> Result<()>,
}

impl fmt::Debug for Migration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Migration")
            .field("from", &self.from)
            .field("to", &self.to)
            .finish_non_exhaustive()
    }
}

/// Read a document of any generation `D` knows how to upgrade
pub fn upgrade<D: Versioned>(bytes: &[u8]) -> Result<D> {
    let mut document: Value = serde_json::from_slice(bytes).map_err(MetadataError::Decode)?;
    let mut version = version_of(&document)?;

    if version == SCHEMA_VERSION {
        return load(bytes);
    }

    // Every step must advance; the table length bounds the walk
    for _ in 0..D::MIGRATIONS.len() {
        let step = D::MIGRATIONS
            .iter()
            .find(|m| m.from == version)
            .ok_or_else(|| MetadataError::NoMigration {
                kind: D::KIND.to_string(),
                from: version.clone(),
            })?;

        debug!(kind = %D::KIND, from = step.from, to = step.to, "migrating document");
        (step.apply)(&mut document)?;
        set_version(&mut document, step.to)?;
        version = step.to.to_string();

        if version == SCHEMA_VERSION {
            let upgraded = serde_json::to_vec(&document).map_err(MetadataError::Encode)?;
            return load(&upgraded);
        }
    }

    Err(MetadataError::NoMigration {
        kind: D::KIND.to_string(),
        from: version,
    })
}

/// Upgrade an ETD work from any known generation
pub fn upgrade_etd_work(bytes: &[u8]) -> Result<EtdWork> {
    upgrade(bytes)
}

/// Upgrade an open-access work from any known generation
pub fn upgrade_oa_work(bytes: &[u8]) -> Result<OaWork> {
    upgrade(bytes)
}

/// Upgrade whichever variant `kind` names
pub fn upgrade_work(kind: WorkKind, bytes: &[u8]) -> Result<Work> {
    match kind {
        WorkKind::Etd => upgrade_etd_work(bytes).map(Work::Etd),
        WorkKind::Oa => upgrade_oa_work(bytes).map(Work::Oa),
    }
}

fn version_of(document: &Value) -> Result<String> {
    let object = document.as_object().ok_or_else(|| MetadataError::Migration {
        from: LEGACY_VERSION.to_string(),
        reason: "document is not a JSON object".to_string(),
    })?;

    match object.get("version") {
        None | Some(Value::Null) => Ok(LEGACY_VERSION.to_string()),
        Some(Value::String(v)) => Ok(v.clone()),
        Some(other) => Err(MetadataError::Migration {
            from: other.to_string(),
            reason: "version tag is not a string".to_string(),
        }),
    }
}

fn set_version(document: &mut Value, version: &str) -> Result<()> {
    let object = document.as_object_mut().ok_or_else(|| MetadataError::Migration {
        from: version.to_string(),
        reason: "document is not a JSON object".to_string(),
    })?;
    object.insert("version".to_string(), Value::String(version.to_string()));
    Ok(())
}
