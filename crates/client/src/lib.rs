//! REST client for the BuildSense supervision backend.
//!
//! One shared [`reqwest::Client`] behind per-resource API structs:
//!
//! - [`IssuesApi`] — issue reports: list/get/create/update/delete, merge,
//!   backend document generation, and the Chinese-keyed upsert endpoint.
//! - [`SupervisionApi`] — stand-by records: CRUD plus attached-document
//!   upload/removal and backend document generation.
//! - [`LogsApi`] — daily supervision logs: CRUD, status transitions,
//!   project/supervisor listings, summary statistics.
//! - [`UploadApi`] — image upload returning a hosted URL.
//!
//! Every source loads independently: a failed fetch of one record kind is
//! surfaced through [`ApiError`] and never blocks the others. Mutations
//! report exactly one terminal outcome through the [`Notifier`] boundary.

pub mod config;
pub mod error;
pub mod issues;
pub mod logs;
pub mod notify;
pub mod supervision;
pub mod upload;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use issues::IssuesApi;
pub use logs::LogsApi;
pub use notify::{Notification, Notifier, TracingNotifier};
pub use supervision::SupervisionApi;
pub use upload::UploadApi;
