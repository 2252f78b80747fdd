//! Open-access works

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::document::{Document, Versioned, WorkKind};
use crate::error::Result;
use crate::migrate::Migration;
use crate::normalize::null_as_empty;
use crate::participant::ParticipantRecord;
use crate::version::SCHEMA_VERSION;
use crate::workflow::OaWorkflowState;

/// A non-thesis scholarly work deposited for open access
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OaWork {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authors: Vec<ParticipantRecord>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
    #[serde(default)]
    pub license: String,
    #[serde(default, rename = "licenseURL")]
    pub license_url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub languages: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keywords: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub contributors: Vec<ParticipantRecord>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub citation: String,
    /// Kept as text: partial dates such as "2020" or "2020-05" are valid
    #[serde(default, rename = "pubDate")]
    pub publication_date: String,
    #[serde(default, rename = "relatedURLs", deserialize_with = "null_as_empty")]
    pub related_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sponsors: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub admin_notes: String,
    #[serde(default)]
    pub workflow: OaWorkflowState,
}

impl OaWork {
    /// An empty work tagged with the current schema version
    pub fn new() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            ..Self::default()
        }
    }

    /// Whether `compute_id` belongs to one of the contributors
    pub fn is_contributor(&self, compute_id: &str) -> bool {
        self.contributors.iter().any(|c| c.compute_id == compute_id)
    }
}

impl Document for OaWork {
    fn kind(&self) -> WorkKind {
        WorkKind::Oa
    }

    fn version(&self) -> &str {
        &self.version
    }

    fn stamp_version(&mut self) {
        self.version = SCHEMA_VERSION.to_string();
    }

    fn is_author(&self, compute_id: &str) -> bool {
        self.authors.iter().any(|a| a.compute_id == compute_id)
    }
}

impl Versioned for OaWork {
    const KIND: WorkKind = WorkKind::Oa;

    const SEQUENCE_FIELDS: &'static [&'static str] = &[
        "authors",
        "languages",
        "keywords",
        "contributors",
        "relatedURLs",
        "sponsors",
    ];

    const MIGRATIONS: &'static [Migration] = &[Migration {
        from: "0",
        to: "1",
        apply: untagged_deposit,
    }];
}

/// The untagged deposit shape already matches generation 1 field for field
fn untagged_deposit(_document: &mut Value) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::load_oa_work;

    fn two_authors() -> OaWork {
        let mut work = OaWork::new();
        work.authors = vec![
            ParticipantRecord::new("abc123", "Ada", "Lovelace"),
            ParticipantRecord::new("xyz999", "Alan", "Turing"),
        ];
        work
    }

    #[test]
    fn test_is_author_case_sensitive() {
        let work = two_authors();
        assert!(work.is_author("abc123"));
        assert!(work.is_author("xyz999"));
        assert!(!work.is_author("ABC123"));
        assert!(!work.is_author("nope"));
    }

    #[test]
    fn test_external_author_matched_by_empty_id() {
        let mut work = two_authors();
        assert!(!work.is_author(""));
        work.authors.push(ParticipantRecord::new("", "External", "Person"));
        assert!(work.is_author(""));
    }

    #[test]
    fn test_loaded_external_author() {
        let work = load_oa_work(br#"{"version": "1", "authors": [{"computeID": ""}]}"#).unwrap();
        assert!(work.is_author(""));
        assert!(!work.is_author("abc123"));
    }

    #[test]
    fn test_contributors_are_not_authors() {
        let mut work = two_authors();
        work.contributors.push(ParticipantRecord::new("con1", "Grace", "Hopper"));
        assert!(work.is_contributor("con1"));
        assert!(!work.is_author("con1"));
    }

    #[test]
    fn test_partial_publication_date_kept_verbatim() {
        let work = load_oa_work(br#"{"version": "1", "pubDate": "2020-05"}"#).unwrap();
        assert_eq!(work.publication_date, "2020-05");
    }

    #[test]
    fn test_every_sequence_normalized() {
        let bytes = br#"{
            "version": "1",
            "authors": null,
            "languages": null,
            "keywords": null,
            "contributors": null,
            "relatedURLs": null
        }"#;
        let work = load_oa_work(bytes).unwrap();
        assert!(work.authors.is_empty());
        assert!(work.languages.is_empty());
        assert!(work.keywords.is_empty());
        assert!(work.contributors.is_empty());
        assert!(work.related_urls.is_empty());
        assert!(work.sponsors.is_empty());
    }

    #[test]
    fn test_sequence_fields_match_wire_names() {
        let json = serde_json::to_value(OaWork::new()).unwrap();
        for field in OaWork::SEQUENCE_FIELDS {
            assert_eq!(json[*field], serde_json::json!([]), "field {}", field);
        }
    }
}
