//! Post-submission processing state
//!
//! These records are owned by the workflow and storage layers. Document
//! methods read them but never change them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Workflow state embedded in an ETD work
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtdWorkflowState {
    #[serde(default)]
    pub embargo_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embargo_release_date: Option<DateTime<Utc>>,
    /// When the author was sent the submission notice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_notified: Option<DateTime<Utc>>,
    /// When the advisors were sent the submission notice
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_notified: Option<DateTime<Utc>>,
}

impl EtdWorkflowState {
    /// Whether an embargo is still in force at `now`
    pub fn is_embargoed(&self, now: DateTime<Utc>) -> bool {
        self.embargo_release_date.is_some_and(|release| release > now)
    }
}

/// Workflow state embedded in an open-access work
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OaWorkflowState {
    #[serde(default)]
    pub embargo_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embargo_release_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_notified: Option<DateTime<Utc>>,
}

impl OaWorkflowState {
    /// Whether an embargo is still in force at `now`
    pub fn is_embargoed(&self, now: DateTime<Utc>) -> bool {
        self.embargo_release_date.is_some_and(|release| release > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamps_are_rfc3339() {
        let bytes = br#"{
            "embargoType": "uva",
            "embargoReleaseDate": "2030-01-01T00:00:00Z",
            "authorNotified": "2024-05-01T12:30:00Z"
        }"#;
        let state: EtdWorkflowState = serde_json::from_slice(bytes).unwrap();
        assert_eq!(state.embargo_type, "uva");
        assert_eq!(
            state.author_notified,
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap())
        );
        assert!(state.advisor_notified.is_none());
    }

    #[test]
    fn test_embargo_window() {
        let state = OaWorkflowState {
            embargo_type: "embargo".to_string(),
            embargo_release_date: Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()),
            author_notified: None,
        };
        assert!(state.is_embargoed(Utc.with_ymd_and_hms(2029, 12, 31, 0, 0, 0).unwrap()));
        assert!(!state.is_embargoed(Utc.with_ymd_and_hms(2030, 1, 2, 0, 0, 0).unwrap()));
        assert!(!OaWorkflowState::default().is_embargoed(Utc::now()));
    }

    #[test]
    fn test_unset_timestamps_omitted() {
        let json = serde_json::to_value(EtdWorkflowState::default()).unwrap();
        assert_eq!(json, serde_json::json!({ "embargoType": "" }));
    }
}
