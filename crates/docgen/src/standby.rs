//! Stand-by record document generation.
//!
//! [`generate_standby_document`] is pure over its input: it renders the
//! fixed schema into `word/document.xml` and packages the OPC container in
//! memory. Saving the bytes to disk is a separate step
//! ([`save_document`]) so the host decides when the side effect happens.

use std::path::{Path, PathBuf};

use buildsense_core::naming;
use buildsense_core::record::SupervisionRecord;
use chrono::Utc;

use crate::error::DocError;
use crate::schema::{RowSpec, SIGNATURE_ROWS, STANDBY_SCHEMA};
use crate::xml::{self, Align};
use crate::{docx, xml::cell};

/// Body text: SimSun 12 pt (24 half-points).
const BODY_FONT: &str = "SimSun";
const BODY_SIZE: u32 = 24;

/// Title: SimHei 16 pt, bold, centered.
const TITLE_FONT: &str = "SimHei";
const TITLE_SIZE: u32 = 32;
const TITLE_TEXT: &str = "旁 站 记 录";

/// Flat field payload for one stand-by record document.
///
/// Every field is optional; absent fields render as empty cells.
#[derive(Debug, Clone, Default)]
pub struct SupervisionDocData {
    pub project_name: Option<String>,
    pub construction_unit: Option<String>,
    pub standby_unit: Option<String>,
    pub supervision_company: Option<String>,
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
    pub work_overview: Option<String>,
    pub pre_work_check_content: Option<String>,
    pub supervising_personnel: Option<String>,
    pub on_site_supervising_personnel: Option<String>,
    pub issues_and_opinions: Option<String>,
    pub rectification_status: Option<String>,
    pub construction_enterprise: Option<String>,
    pub supervising_enterprise: Option<String>,
    pub supervising_organization: Option<String>,
    pub remarks: Option<String>,
}

impl From<&SupervisionRecord> for SupervisionDocData {
    fn from(rec: &SupervisionRecord) -> Self {
        SupervisionDocData {
            project_name: rec.project_name.clone(),
            construction_unit: rec.construction_unit.clone(),
            standby_unit: rec.standby_unit.clone(),
            supervision_company: rec.supervision_company.clone(),
            start_datetime: rec.start_datetime.clone(),
            end_datetime: rec.end_datetime.clone(),
            work_overview: rec.work_overview.clone(),
            pre_work_check_content: rec.pre_work_check_content.clone(),
            supervising_personnel: rec.supervising_personnel.clone(),
            on_site_supervising_personnel: rec.on_site_supervising_personnel.clone(),
            issues_and_opinions: rec.issues_and_opinions.clone(),
            rectification_status: rec.rectification_status.clone(),
            construction_enterprise: rec.construction_enterprise.clone(),
            supervising_enterprise: rec.supervising_enterprise.clone(),
            supervising_organization: rec.supervising_organization.clone(),
            remarks: rec.remarks.clone(),
        }
    }
}

/// Format a record datetime for display: `YYYY/MM/DD HH:MM`, no timezone
/// marker. Missing or unparseable input renders as the empty string.
pub(crate) fn format_datetime(value: Option<&str>) -> String {
    let Some(value) = value else {
        return String::new();
    };
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return dt.naive_utc().format("%Y/%m/%d %H:%M").to_string();
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(value, fmt) {
            return dt.format("%Y/%m/%d %H:%M").to_string();
        }
    }
    String::new()
}

/// Label cell: 25% width, bold, centered.
fn label_cell(text: &str) -> String {
    cell(text, 25, 1, BODY_FONT, BODY_SIZE, true, Align::Center)
}

/// Content cell, optionally merged across the remaining grid columns.
fn content_cell(text: &str, span: u32) -> String {
    let width = if span > 1 { 75 } else { 25 };
    cell(text, width, span, BODY_FONT, BODY_SIZE, false, Align::Left)
}

/// Render the main table from the declarative schema.
fn main_table(data: &SupervisionDocData) -> String {
    let rows: Vec<String> = STANDBY_SCHEMA
        .iter()
        .map(|spec| match spec {
            RowSpec::Single { label, field } | RowSpec::Multiline { label, field } => xml::row(&[
                label_cell(label),
                content_cell(&field.value(data), 3),
            ]),
            RowSpec::Pair {
                left_label,
                left,
                right_label,
                right,
            } => xml::row(&[
                label_cell(left_label),
                content_cell(&left.value(data), 1),
                label_cell(right_label),
                content_cell(&right.value(data), 1),
            ]),
        })
        .collect();
    xml::table(&rows)
}

/// Empty fillable cell in the signature block, centered like its labels.
fn fill_cell() -> String {
    cell("", 25, 1, BODY_FONT, BODY_SIZE, false, Align::Center)
}

/// Render the trailing signature block with empty fillable cells.
fn signature_table() -> String {
    let rows: Vec<String> = SIGNATURE_ROWS
        .iter()
        .map(|(who, date_label)| {
            xml::row(&[
                label_cell(who),
                fill_cell(),
                label_cell(date_label),
                fill_cell(),
            ])
        })
        .collect();
    xml::table(&rows)
}

/// Generate the complete stand-by record document.
///
/// Returns the raw DOCX bytes; the caller pairs them with
/// [`standby_filename`] and [`save_document`] (or hands them to the
/// browser as a download blob).
pub fn generate_standby_document(data: &SupervisionDocData) -> Result<Vec<u8>, DocError> {
    let mut body = String::new();
    body.push_str(&xml::paragraph(
        TITLE_TEXT, TITLE_FONT, TITLE_SIZE, true, Align::Center,
    ));
    body.push_str(&main_table(data));
    body.push_str(&xml::spacer_paragraph());
    body.push_str(&signature_table());

    docx::package(&docx::document_part(&body))
}

/// File name for the generated document, dated today.
pub fn standby_filename(data: &SupervisionDocData) -> String {
    naming::standby_document_filename(data.project_name.as_deref(), Utc::now().date_naive())
}

/// Save generated bytes under `dir/filename`.
///
/// Writes through a temporary file and renames on completion, so an I/O
/// failure never leaves a partially-written document at the target path.
pub fn save_document(dir: &Path, filename: &str, bytes: &[u8]) -> Result<PathBuf, DocError> {
    let target = dir.join(filename);
    let tmp = dir.join(format!("{filename}.tmp"));
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, &target)?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rfc3339_and_naive_datetimes() {
        assert_eq!(
            format_datetime(Some("2025-05-10T14:30:00Z")),
            "2025/05/10 14:30"
        );
        assert_eq!(
            format_datetime(Some("2025-05-10T14:30:00")),
            "2025/05/10 14:30"
        );
        assert_eq!(
            format_datetime(Some("2025-05-10 09:05:00")),
            "2025/05/10 09:05"
        );
    }

    #[test]
    fn malformed_datetime_renders_empty() {
        assert_eq!(format_datetime(Some("昨天下午")), "");
        assert_eq!(format_datetime(Some("")), "");
        assert_eq!(format_datetime(None), "");
    }

    #[test]
    fn signature_block_cells_are_all_centered() {
        let xml = signature_table();
        // Two rows of four cells each; labels and fillable cells alike.
        assert_eq!(xml.matches("<w:tc>").count(), 8);
        assert_eq!(xml.matches("w:val=\"center\"").count(), 8);
        assert!(!xml.contains("w:val=\"left\""));
    }

    #[test]
    fn filename_uses_placeholder_without_project_name() {
        let name = standby_filename(&SupervisionDocData::default());
        assert!(name.starts_with("旁站记录_未命名项目_"));
        assert!(name.ends_with(".docx"));
    }
}
