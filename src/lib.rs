//! Libra Metadata
//!
//! Schema-versioned metadata documents exchanged between the deposit service
//! and the archive: electronic theses and dissertations (ETD) and
//! open-access (OA) works.
//!
//! ## Features
//!
//! - **Version Gate**: A payload loads only when its `version` tag matches [`SCHEMA_VERSION`]
//! - **Normalized Collections**: Null or missing lists always decode as empty
//! - **Storage Adapter**: Uniform MIME type, bytes and timestamps for the archive
//! - **Migrations**: Opt-in, table-driven upgrades of earlier generations
//! - **Audit Trail**: Decoding of append-only field change records
//!
//! ## Data flow
//!
//! ```text
//! bytes ──check_version──► decode + normalize ──► EtdWork / OaWork
//!                                                      │ (edits)
//! archive ◄── mime type + payload() ◄── StoredDocument ◄┘
//! ```

pub mod audit;
pub mod config;
pub mod document;
pub mod dump;
pub mod error;
pub mod etd;
pub mod migrate;
pub mod normalize;
pub mod oa;
pub mod participant;
pub mod payload;
pub mod version;
pub mod workflow;

pub use audit::{load_audit_trail, AuditRecord};
pub use document::{load, load_etd_work, load_oa_work, load_work, Document, Versioned, Work, WorkKind};
pub use error::{MetadataError, Result};
pub use etd::EtdWork;
pub use migrate::{upgrade, upgrade_etd_work, upgrade_oa_work, upgrade_work};
pub use oa::OaWork;
pub use participant::{ParticipantRecord, StudentAuthorRecord};
pub use payload::{StoragePayload, StoredDocument, MIME_TYPE, UNTRACKED};
pub use version::{check_version, read_version, SCHEMA_VERSION};
pub use workflow::{EtdWorkflowState, OaWorkflowState};
