//! Human and machine readable renderings for the dump tool

use std::fmt::Write;

use crate::audit::AuditRecord;
use crate::document::Work;
use crate::error::{MetadataError, Result};
use crate::etd::EtdWork;
use crate::oa::OaWork;
use crate::participant::ParticipantRecord;

/// Render a document as JSON
pub fn render_json(work: &Work, pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(work).map_err(MetadataError::Encode)
    } else {
        serde_json::to_string(work).map_err(MetadataError::Encode)
    }
}

/// Render an audit trail as JSON
pub fn render_audit_json(records: &[AuditRecord], pretty: bool) -> Result<String> {
    if pretty {
        serde_json::to_string_pretty(records).map_err(MetadataError::Encode)
    } else {
        serde_json::to_string(records).map_err(MetadataError::Encode)
    }
}

/// Render a document as labelled lines, skipping blank values
pub fn render_text(work: &Work) -> String {
    let mut out = Lines::default();
    match work {
        Work::Etd(etd) => etd_text(&mut out, etd),
        Work::Oa(oa) => oa_text(&mut out, oa),
    }
    out.0
}

/// Render an audit trail one record per line
pub fn render_audit_text(records: &[AuditRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, " {}", record);
    }
    out
}

#[derive(Default)]
struct Lines(String);

impl Lines {
    fn field(&mut self, label: &str, value: &str) {
        if !value.trim().is_empty() {
            let _ = writeln!(self.0, "{:<16}{}", format!("{}:", label), value);
        }
    }

    fn list(&mut self, label: &str, values: &[String]) {
        self.field(label, &values.join(", "));
    }

    fn heading(&mut self, label: &str) {
        let _ = writeln!(self.0, "{}:", label);
    }

    fn participants(&mut self, label: &str, people: &[ParticipantRecord]) {
        if people.is_empty() {
            return;
        }
        self.heading(&format!(" {}", label));
        for person in people {
            self.field("   cid", &person.compute_id);
            self.field("   first name", &person.first_name);
            self.field("   last name", &person.last_name);
            self.field("   department", person.department.as_deref().unwrap_or_default());
            self.field("   institution", &person.institution);
            self.field("   orcid", person.orcid.as_deref().unwrap_or_default());
        }
    }
}

fn etd_text(out: &mut Lines, work: &EtdWork) {
    out.field(" version", &work.version);
    out.field(" program", &work.program);
    out.field(" degree", &work.degree);
    out.field(" title", &work.title);
    out.field(" visibility", &work.visibility);

    out.heading(" author");
    out.field("   cid", &work.author.compute_id);
    out.field("   first name", &work.author.first_name);
    out.field("   last name", &work.author.last_name);
    out.field("   program", &work.author.program);
    out.field("   institution", &work.author.institution);

    out.participants("advisors", &work.advisors);

    out.field(" abstract", &work.abstract_text);
    out.field(" license", &work.license);
    out.field(" license url", &work.license_url);
    out.list(" keywords", &work.keywords);
    out.field(" language", &work.language);
    out.list(" urls", &work.related_urls);
    out.list(" sponsors", &work.sponsors);
    out.field(" notes", &work.notes);
    out.field(" embargo", &work.workflow.embargo_type);
}

fn oa_text(out: &mut Lines, work: &OaWork) {
    out.field(" version", &work.version);
    out.field(" visibility", &work.visibility);
    out.field(" resource", &work.resource_type);
    out.field(" title", &work.title);

    out.participants("authors", &work.authors);

    out.field(" abstract", &work.abstract_text);
    out.field(" license", &work.license);
    out.field(" license url", &work.license_url);
    out.list(" languages", &work.languages);
    out.list(" keywords", &work.keywords);

    out.participants("contributors", &work.contributors);

    out.field(" publisher", &work.publisher);
    out.field(" citation", &work.citation);
    out.field(" pub date", &work.publication_date);
    out.list(" urls", &work.related_urls);
    out.list(" sponsors", &work.sponsors);
    out.field(" notes", &work.notes);
    out.field(" embargo", &work.workflow.embargo_type);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::load_etd_work;

    #[test]
    fn test_text_skips_blank_fields() {
        let work = load_etd_work(
            br#"{"version": "1", "degree": "PhD", "title": "  ", "author": {"computeID": "ab1cd"}}"#,
        )
        .unwrap();
        let text = render_text(&Work::Etd(work));
        assert!(text.contains(" degree:        PhD\n"));
        assert!(text.contains("   cid:         ab1cd\n"));
        assert!(!text.contains("title"));
        assert!(!text.contains("advisors"));
        assert!(!text.contains("keywords"));
    }

    #[test]
    fn test_text_joins_lists() {
        let mut work = OaWork::new();
        work.keywords = vec!["a".to_string(), "b".to_string()];
        work.authors.push(ParticipantRecord::new("abc123", "Ada", "Lovelace"));
        let text = render_text(&Work::Oa(work));
        assert!(text.contains(" keywords:      a, b\n"));
        assert!(text.contains(" authors:\n"));
        assert!(text.contains("   last name:   Lovelace\n"));
    }

    #[test]
    fn test_json_compact_and_pretty() {
        let work = Work::Etd(EtdWork::new());
        let compact = render_json(&work, false).unwrap();
        let pretty = render_json(&work, true).unwrap();
        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&compact).unwrap(),
            serde_json::from_str::<serde_json::Value>(&pretty).unwrap()
        );
    }

    #[test]
    fn test_audit_text_one_line_per_record() {
        let records = crate::audit::load_audit_trail(
            br#"[{"who": "w", "oid": "o", "namespace": "n", "fieldName": "f",
                  "before": "", "after": "x", "eventTime": "2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(render_audit_text(&records).lines().count(), 1);
        assert!(render_audit_json(&records, false).unwrap().starts_with('['));
    }
}
