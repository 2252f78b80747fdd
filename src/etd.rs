//! Electronic thesis and dissertation works

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{Document, Versioned, WorkKind};
use crate::error::{MetadataError, Result};
use crate::migrate::Migration;
use crate::normalize::null_as_empty;
use crate::participant::{ParticipantRecord, StudentAuthorRecord};
use crate::version::SCHEMA_VERSION;
use crate::workflow::EtdWorkflowState;

/// An ETD deposit as stored by the archive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtdWork {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub program: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub author: StudentAuthorRecord,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub advisors: Vec<ParticipantRecord>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub license: String,
    #[serde(default, rename = "licenseURL")]
    pub license_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub language: String,
    #[serde(default, rename = "relatedURLs", deserialize_with = "null_as_empty")]
    pub related_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sponsors: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub admin_notes: String,
    #[serde(default)]
    pub workflow: EtdWorkflowState,
}

impl EtdWork {
    /// An empty work tagged with the current schema version
    pub fn new() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            ..Self::default()
        }
    }

    /// Whether `compute_id` belongs to one of the advisors
    pub fn is_advisor(&self, compute_id: &str) -> bool {
        self.advisors.iter().any(|a| a.compute_id == compute_id)
    }
}

impl Document for EtdWork {
    fn kind(&self) -> WorkKind {
        WorkKind::Etd
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn stamp_version(&mut self) {
        self.version = SCHEMA_VERSION.to_string();
    }

    fn is_author(&self, compute_id: &str) -> bool {
        self.author.compute_id == compute_id
    }
}

impl Versioned for EtdWork {
    const KIND: WorkKind = WorkKind::Etd;

    const SEQUENCE_FIELDS: &'static [&'static str] =
        &["advisors", "keywords", "relatedURLs", "sponsors"];

    const MIGRATIONS: &'static [Migration] = &[Migration {
        from: "0",
        to: "1",
        apply: author_department_to_program,
    }];
}

/// Generation 0 reused the generic person shape for the student author, so
/// the degree program sat under `department`.
fn author_department_to_program(document: &mut Value) -> Result<()> {
    let Some(author) = document.get_mut("author") else {
        return Ok(());
    };
    if author.is_null() {
        return Ok(());
    }
    let author = author.as_object_mut().ok_or_else(|| MetadataError::Migration {
        from: "0".to_string(),
        reason: "author is not an object".to_string(),
    })?;

    if let Some(department) = author.remove("department") {
        let program_missing = author
            .get("program")
            .map_or(true, |p| p.as_str().map_or(true, str::is_empty));
        if program_missing {
            author.insert("program".to_string(), department);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::load_etd_work;
    use serde_json::json;

    #[test]
    fn test_new_carries_current_version() {
        let work = EtdWork::new();
        assert_eq!(work.version, SCHEMA_VERSION);
        assert!(work.advisors.is_empty());
    }

    #[test]
    fn test_null_collections_become_empty() {
        let bytes = br#"{"version":"1","degree":"PhD","title":"T","author":{"computeID":"ab1cd"},"advisors":null,"keywords":null}"#;
        let work = load_etd_work(bytes).unwrap();
        assert_eq!(work.degree, "PhD");
        assert_eq!(work.title, "T");
        assert_eq!(work.author.compute_id, "ab1cd");
        assert!(work.advisors.is_empty());
        assert!(work.keywords.is_empty());
        assert!(work.related_urls.is_empty());
        assert!(work.sponsors.is_empty());
    }

    #[test]
    fn test_is_author() {
        let mut work = EtdWork::new();
        work.author.compute_id = "ab1cd".to_string();
        assert!(work.is_author("ab1cd"));
        assert!(!work.is_author("AB1CD"));
        assert!(!work.is_author("zz9zz"));
    }

    #[test]
    fn test_empty_id_matches_empty_author_id() {
        let mut work = EtdWork::new();
        assert!(work.is_author(""));
        work.author.compute_id = "ab1cd".to_string();
        assert!(!work.is_author(""));
    }

    #[test]
    fn test_is_advisor() {
        let mut work = EtdWork::new();
        work.advisors.push(ParticipantRecord::new("adv1", "Grace", "Hopper"));
        assert!(work.is_advisor("adv1"));
        assert!(!work.is_advisor("ab1cd"));
    }

    #[test]
    fn test_wire_names() {
        let mut work = EtdWork::new();
        work.abstract_text = "A".to_string();
        work.license_url = "https://creativecommons.org/licenses/by/4.0/".to_string();
        work.related_urls.push("https://example.org".to_string());
        work.admin_notes = "internal".to_string();

        let json = serde_json::to_value(&work).unwrap();
        assert_eq!(json["abstract"], "A");
        assert_eq!(json["licenseURL"], "https://creativecommons.org/licenses/by/4.0/");
        assert_eq!(json["relatedURLs"], json!(["https://example.org"]));
        assert_eq!(json["adminNotes"], "internal");
        assert_eq!(json["advisors"], json!([]));
    }

    #[test]
    fn test_migration_moves_department() {
        let mut doc = json!({"author": {"computeID": "ab1cd", "department": "Physics"}});
        author_department_to_program(&mut doc).unwrap();
        assert_eq!(doc, json!({"author": {"computeID": "ab1cd", "program": "Physics"}}));
    }

    #[test]
    fn test_migration_keeps_existing_program() {
        let mut doc = json!({"author": {"program": "Chemistry", "department": "Physics"}});
        author_department_to_program(&mut doc).unwrap();
        assert_eq!(doc, json!({"author": {"program": "Chemistry"}}));
    }

    #[test]
    fn test_migration_rejects_malformed_author() {
        let mut doc = json!({"author": "ab1cd"});
        let err = author_department_to_program(&mut doc).unwrap_err();
        assert!(matches!(err, MetadataError::Migration { .. }));
    }
}
