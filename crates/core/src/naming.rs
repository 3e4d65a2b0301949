//! Generated-document file naming.
//!
//! Convention: `{标题前缀}_{项目名或占位符}_{YYYY-MM-DD}.docx`. The project
//! segment is never left empty — a fixed placeholder stands in when the
//! record has no project name.

use chrono::NaiveDate;

/// Title prefix for stand-by record documents.
pub const STANDBY_DOC_PREFIX: &str = "旁站记录";

/// Title prefix for issue record documents.
pub const ISSUE_DOC_PREFIX: &str = "问题记录";

/// Placeholder used when a record carries no project name.
pub const UNNAMED_PROJECT: &str = "未命名项目";

/// File name for a generated stand-by record document.
///
/// # Examples
///
/// ```
/// use buildsense_core::naming::standby_document_filename;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2025, 5, 10).unwrap();
/// assert_eq!(
///     standby_document_filename(Some("某某工程"), date),
///     "旁站记录_某某工程_2025-05-10.docx"
/// );
/// assert_eq!(
///     standby_document_filename(None, date),
///     "旁站记录_未命名项目_2025-05-10.docx"
/// );
/// ```
pub fn standby_document_filename(project_name: Option<&str>, date: NaiveDate) -> String {
    let project = match project_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => UNNAMED_PROJECT,
    };
    format!("{STANDBY_DOC_PREFIX}_{project}_{}.docx", date.format("%Y-%m-%d"))
}

/// File name for a backend-generated issue document download.
pub fn issue_document_filename(issue_id: i64, date: NaiveDate) -> String {
    format!("{ISSUE_DOC_PREFIX}_{issue_id}_{}.docx", date.format("%Y-%m-%d"))
}
