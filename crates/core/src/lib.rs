//! BuildSense domain core.
//!
//! Pure, I/O-free building blocks shared by the REST client, the document
//! generator, and the view layer:
//!
//! - [`record`] — the closed record union over the four record kinds.
//! - [`status`] — issue and log status taxonomies with their wire labels.
//! - [`key`] — synthetic display keys and backend-id recovery.
//! - [`reconcile`] — merging kind-partitioned sources into one addressable
//!   list, plus the pure type/status filter.
//! - [`selection`] — the issue-only multi-select set.
//! - [`naming`] — deterministic generated-document file names.

pub mod error;
pub mod key;
pub mod naming;
pub mod reconcile;
pub mod record;
pub mod selection;
pub mod status;
pub mod types;

pub use error::CoreError;
pub use key::DisplayKey;
pub use reconcile::{filter, reconcile, ReconciledRecord, StatusFilter, TypeFilter};
pub use record::{BackendId, EventRecord, RecordKind, RecordPayload};
pub use selection::SelectionSet;
pub use status::{IssueStatus, LogStatus};
