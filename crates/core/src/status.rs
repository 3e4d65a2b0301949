//! Status taxonomies and their wire labels.
//!
//! The issue backend speaks localized Chinese labels; the internal enums are
//! the only representation the rest of the core works with. Both mappings
//! are total: every internal state has exactly one wire label, and reading
//! an unrecognized label degrades to the initial state instead of failing.

use serde::{Deserialize, Serialize};

/// Lifecycle state of an issue record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueStatus {
    /// 待处理 — reported, nothing done yet.
    Pending,
    /// 处理中 — rectification in progress.
    Processing,
    /// 已闭环 — closed out; resolved issues are read-only in the UI.
    Resolved,
}

impl IssueStatus {
    /// The exact label the backend stores and filters on.
    pub fn backend_label(self) -> &'static str {
        match self {
            IssueStatus::Pending => "待处理",
            IssueStatus::Processing => "处理中",
            IssueStatus::Resolved => "已闭环",
        }
    }

    /// Map a backend label to the internal state.
    ///
    /// Unrecognized labels (including empty strings from legacy rows) read
    /// as [`IssueStatus::Pending`].
    pub fn from_backend_label(label: &str) -> Self {
        match label {
            "待处理" => IssueStatus::Pending,
            "处理中" => IssueStatus::Processing,
            "已闭环" => IssueStatus::Resolved,
            _ => IssueStatus::Pending,
        }
    }
}

/// Workflow state of a daily supervision log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    Rejected,
}

impl LogStatus {
    /// Wire token used by the supervision-log API.
    pub fn as_str(self) -> &'static str {
        match self {
            LogStatus::Draft => "draft",
            LogStatus::Submitted => "submitted",
            LogStatus::Approved => "approved",
            LogStatus::Rejected => "rejected",
        }
    }

    /// Parse a wire token; unknown tokens read as [`LogStatus::Draft`].
    pub fn from_str_or_draft(s: &str) -> Self {
        match s {
            "submitted" => LogStatus::Submitted,
            "approved" => LogStatus::Approved,
            "rejected" => LogStatus::Rejected,
            _ => LogStatus::Draft,
        }
    }
}

/// Status of a record, tagged by the kind that carries it.
///
/// Supervision records and meeting minutes have no status; issues and daily
/// logs each have their own small enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Issue(IssueStatus),
    Log(LogStatus),
}
