//! Document capabilities and the version-gated loader

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{MetadataError, Result};
use crate::etd::EtdWork;
use crate::migrate::Migration;
use crate::oa::OaWork;
use crate::version::check_version;

/// Which document variant a payload holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WorkKind {
    /// Electronic thesis or dissertation
    #[default]
    Etd,
    /// Open-access deposit
    Oa,
}

impl WorkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkKind::Etd => "etd",
            WorkKind::Oa => "oa",
        }
    }
}

impl fmt::Display for WorkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkKind {
    type Err = MetadataError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "etd" => Ok(WorkKind::Etd),
            "oa" => Ok(WorkKind::Oa),
            _ => Err(MetadataError::UnsupportedKind(s.to_string())),
        }
    }
}

/// Operations every metadata document supports
pub trait Document: Serialize + Clone {
    /// The variant of this document
    fn kind(&self) -> WorkKind;

    /// The schema version tag the document currently carries
    fn version(&self) -> &str;

    /// Overwrite the version tag with [`SCHEMA_VERSION`](crate::SCHEMA_VERSION)
    fn stamp_version(&mut self);

    /// Case-sensitive computeID match against the document's author(s)
    fn is_author(&self, compute_id: &str) -> bool;
}

/// A concrete document shape that can be decoded from storage
pub trait Versioned: Document + DeserializeOwned {
    const KIND: WorkKind;

    /// Wire names of every sequence field
    const SEQUENCE_FIELDS: &'static [&'static str];

    /// Upgrade steps from historical generations, oldest first
    const MIGRATIONS: &'static [Migration];
}

/// Gate, decode and normalize a document of type `D`.
///
/// Nothing is returned unless the version tag is current and the whole
/// document decodes.
pub fn load<D: Versioned>(bytes: &[u8]) -> Result<D> {
    check_version(bytes)?;
    let document: D = serde_json::from_slice(bytes).map_err(MetadataError::Decode)?;
    trace!(kind = %D::KIND, len = bytes.len(), "loaded document");
    Ok(document)
}

/// Load an ETD work
pub fn load_etd_work(bytes: &[u8]) -> Result<EtdWork> {
    load(bytes)
}

/// Load an open-access work
pub fn load_oa_work(bytes: &[u8]) -> Result<OaWork> {
    load(bytes)
}

/// Either document variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Work {
    Etd(EtdWork),
    Oa(OaWork),
}

impl Work {
    pub fn as_etd(&self) -> Option<&EtdWork> {
        match self {
            Work::Etd(work) => Some(work),
            Work::Oa(_) => None,
        }
    }

    pub fn as_oa(&self) -> Option<&OaWork> {
        match self {
            Work::Oa(work) => Some(work),
            Work::Etd(_) => None,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Work::Etd(work) => &work.title,
            Work::Oa(work) => &work.title,
        }
    }
}

impl Document for Work {
    fn kind(&self) -> WorkKind {
        match self {
            Work::Etd(_) => WorkKind::Etd,
            Work::Oa(_) => WorkKind::Oa,
        }
    }

    fn version(&self) -> &str {
        match self {
            Work::Etd(work) => work.version(),
            Work::Oa(work) => work.version(),
        }
    }

    fn stamp_version(&mut self) {
        match self {
            Work::Etd(work) => work.stamp_version(),
            Work::Oa(work) => work.stamp_version(),
        }
    }

    fn is_author(&self, compute_id: &str) -> bool {
        match self {
            Work::Etd(work) => work.is_author(compute_id),
            Work::Oa(work) => work.is_author(compute_id),
        }
    }
}

impl From<EtdWork> for Work {
    fn from(work: EtdWork) -> Self {
        Work::Etd(work)
    }
}

impl From<OaWork> for Work {
    fn from(work: OaWork) -> Self {
        Work::Oa(work)
    }
}

/// Load whichever variant `kind` names
pub fn load_work(kind: WorkKind, bytes: &[u8]) -> Result<Work> {
    match kind {
        WorkKind::Etd => load_etd_work(bytes).map(Work::Etd),
        WorkKind::Oa => load_oa_work(bytes).map(Work::Oa),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("etd".parse::<WorkKind>().unwrap(), WorkKind::Etd);
        assert_eq!("OA".parse::<WorkKind>().unwrap(), WorkKind::Oa);
        assert!(matches!(
            "thesis".parse::<WorkKind>(),
            Err(MetadataError::UnsupportedKind(_))
        ));
    }

    #[test]
    fn test_load_work_dispatches_on_kind() {
        let bytes = br#"{"version": "1", "title": "Shared", "authors": null}"#;
        let etd = load_work(WorkKind::Etd, bytes).unwrap();
        let oa = load_work(WorkKind::Oa, bytes).unwrap();
        assert_eq!(etd.kind(), WorkKind::Etd);
        assert_eq!(oa.kind(), WorkKind::Oa);
        assert_eq!(etd.title(), "Shared");
        assert!(oa.as_oa().unwrap().authors.is_empty());
    }

    #[test]
    fn test_work_serializes_as_inner_document() {
        let mut etd = EtdWork::new();
        etd.degree = "MA".to_string();
        let direct = serde_json::to_value(&etd).unwrap();
        let wrapped = serde_json::to_value(Work::from(etd)).unwrap();
        assert_eq!(direct, wrapped);
    }

    #[test]
    fn test_mismatch_returns_no_document() {
        let result = load_work(WorkKind::Oa, br#"{"version": "0", "title": "Old"}"#);
        assert!(result.unwrap_err().is_schema_mismatch());
    }
}
