//! The closed record union over the four supervision record kinds.
//!
//! Backend rows arrive as loosely-filled wire DTOs ([`IssueRecord`],
//! [`SupervisionRecord`], ...). Normalization lifts each of them into an
//! [`EventRecord`]: a fixed display projection (`title`, `date`, optional
//! location/time/attendees/weather) plus the full typed payload retained
//! for detail views, editing, and document generation.
//!
//! Normalization never fails. Every required display field has a documented
//! default that is substituted when the backend field is null.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::status::{IssueStatus, LogStatus, RecordStatus};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Kind discriminant
// ---------------------------------------------------------------------------

/// Discriminant over the four record kinds.
///
/// The variant order is the fixed priority order reconciliation merges in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordKind {
    Issue,
    Supervision,
    DailyLog,
    Meeting,
}

impl RecordKind {
    /// All kinds in merge priority order.
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Issue,
        RecordKind::Supervision,
        RecordKind::DailyLog,
        RecordKind::Meeting,
    ];

    /// Stable token used as the display-key prefix.
    pub fn token(self) -> &'static str {
        match self {
            RecordKind::Issue => "issue",
            RecordKind::Supervision => "supervision",
            RecordKind::DailyLog => "daily-log",
            RecordKind::Meeting => "meeting",
        }
    }

    /// Parse a display-key prefix token.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "issue" => Some(RecordKind::Issue),
            "supervision" => Some(RecordKind::Supervision),
            "daily-log" => Some(RecordKind::DailyLog),
            "meeting" => Some(RecordKind::Meeting),
            _ => None,
        }
    }

    /// Human-readable kind label shown on record cards.
    pub fn display_label(self) -> &'static str {
        match self {
            RecordKind::Issue => "问题记录",
            RecordKind::Supervision => "旁站记录",
            RecordKind::DailyLog => "监理日志",
            RecordKind::Meeting => "会议纪要",
        }
    }

    /// Whether ids of this kind are numeric on the backend.
    ///
    /// Issues and stand-by records use BIGSERIAL ids; daily logs and meeting
    /// minutes use opaque text ids.
    pub fn has_numeric_ids(self) -> bool {
        matches!(self, RecordKind::Issue | RecordKind::Supervision)
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

// ---------------------------------------------------------------------------
// Backend identity
// ---------------------------------------------------------------------------

/// A backend-assigned record identifier, unique only within its kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BackendId {
    Numeric(DbId),
    Text(String),
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendId::Numeric(id) => write!(f, "{id}"),
            BackendId::Text(id) => f.write_str(id),
        }
    }
}

impl From<DbId> for BackendId {
    fn from(id: DbId) -> Self {
        BackendId::Numeric(id)
    }
}

impl From<&str> for BackendId {
    fn from(id: &str) -> Self {
        BackendId::Text(id.to_string())
    }
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// An issue report as returned by `GET /issues`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueRecord {
    pub id: Option<DbId>,
    pub location: Option<String>,
    pub description: Option<String>,
    /// Hosted image URLs. The backend is inconsistent here and may return a
    /// JSON array, a single comma-joined string, or an array containing one
    /// comma-joined string; all three are flattened on read.
    #[serde(default, deserialize_with = "deserialize_images")]
    pub images: Vec<String>,
    pub record_time: Option<String>,
    pub update_time: Option<String>,
    /// Localized status label (待处理 / 处理中 / 已闭环).
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
}

/// A stand-by (witness) supervision record as returned by the pangzhan API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupervisionRecord {
    pub id: Option<DbId>,
    pub project_name: Option<String>,
    pub construction_unit: Option<String>,
    /// The unit performing the stand-by supervision.
    #[serde(rename = "pangzhan_unit")]
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
    /// Comma-joined URLs of documents already attached to this record.
    pub document_urls: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A daily supervision log (locally seeded or from the `/sup/logs` API).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyLogRecord {
    pub id: String,
    pub title: Option<String>,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: Option<String>,
    pub project_name: Option<String>,
    pub supervisor_name: Option<String>,
    pub weather: Option<String>,
    pub temperature: Option<String>,
    /// Workflow token (`draft` / `submitted` / `approved` / `rejected`).
    pub status: Option<String>,
}

/// Meeting minutes (locally seeded; there is no backend endpoint yet).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeetingMinutes {
    pub id: String,
    pub title: Option<String>,
    pub date: Option<String>,
    pub attendee_count: Option<u32>,
    pub location: Option<String>,
    pub meeting_name: Option<String>,
    pub host: Option<String>,
    pub recorder: Option<String>,
}

/// The full backend record behind a display row, tagged by kind.
#[derive(Debug, Clone)]
pub enum RecordPayload {
    Issue(IssueRecord),
    Supervision(SupervisionRecord),
    DailyLog(DailyLogRecord),
    Meeting(MeetingMinutes),
}

// ---------------------------------------------------------------------------
// Normalized record
// ---------------------------------------------------------------------------

/// A display-ready record: common projection plus the retained payload.
#[derive(Debug, Clone)]
pub struct EventRecord {
    pub kind: RecordKind,
    pub backend_id: BackendId,
    pub title: String,
    pub date: NaiveDate,
    pub location: Option<String>,
    /// `HH:MM - HH:MM` span for stand-by records.
    pub time_range: Option<String>,
    pub attendee_count: Option<u32>,
    pub weather: Option<String>,
    pub responsible_unit: Option<String>,
    pub status: Option<RecordStatus>,
    pub payload: RecordPayload,
}

impl EventRecord {
    /// Normalize an issue row.
    ///
    /// Defaults: title falls back to the kind label when the description is
    /// null, date falls back to today when the record timestamp is missing
    /// or unparseable, responsible unit is always 施工单位 (the backend has
    /// no such field yet).
    pub fn from_issue(rec: IssueRecord) -> Self {
        let status = IssueStatus::from_backend_label(rec.status.as_deref().unwrap_or(""));
        EventRecord {
            kind: RecordKind::Issue,
            // Reads always carry a backend id; 0 only ever appears for a
            // draft that has not been persisted yet.
            backend_id: BackendId::Numeric(rec.id.unwrap_or(0)),
            title: rec
                .description
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| RecordKind::Issue.display_label().to_string()),
            date: parse_date(rec.record_time.as_deref()),
            location: rec.location.clone(),
            time_range: None,
            attendee_count: None,
            weather: rec.weather.clone(),
            responsible_unit: Some("施工单位".to_string()),
            status: Some(RecordStatus::Issue(status)),
            payload: RecordPayload::Issue(rec),
        }
    }

    /// Normalize a stand-by supervision row.
    ///
    /// Defaults: title falls back to 旁站记录 when the project name is null,
    /// location falls back to 未设置位置 when the stand-by unit is null,
    /// date falls back to today.
    pub fn from_supervision(rec: SupervisionRecord) -> Self {
        let time_range = match (
            parse_datetime(rec.start_datetime.as_deref()),
            parse_datetime(rec.end_datetime.as_deref()),
        ) {
            (Some(start), Some(end)) => Some(format!(
                "{} - {}",
                start.format("%H:%M"),
                end.format("%H:%M")
            )),
            _ => None,
        };
        EventRecord {
            kind: RecordKind::Supervision,
            backend_id: BackendId::Numeric(rec.id.unwrap_or(0)),
            title: rec
                .project_name
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| RecordKind::Supervision.display_label().to_string()),
            date: parse_date(rec.start_datetime.as_deref()),
            location: Some(
                rec.standby_unit
                    .clone()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| "未设置位置".to_string()),
            ),
            time_range,
            attendee_count: None,
            weather: None,
            responsible_unit: None,
            status: None,
            payload: RecordPayload::Supervision(rec),
        }
    }

    /// Normalize a daily supervision log.
    ///
    /// Defaults: title is `监理日志 - <date>` when absent, date falls back
    /// to today.
    pub fn from_daily_log(rec: DailyLogRecord) -> Self {
        let date = rec
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .unwrap_or_else(today);
        EventRecord {
            kind: RecordKind::DailyLog,
            backend_id: BackendId::Text(rec.id.clone()),
            title: rec
                .title
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| format!("监理日志 - {date}")),
            date,
            location: None,
            time_range: None,
            attendee_count: None,
            weather: rec.weather.clone(),
            responsible_unit: None,
            status: Some(RecordStatus::Log(LogStatus::from_str_or_draft(
                rec.status.as_deref().unwrap_or(""),
            ))),
            payload: RecordPayload::DailyLog(rec),
        }
    }

    /// Normalize meeting minutes.
    pub fn from_meeting(rec: MeetingMinutes) -> Self {
        let date = rec
            .date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .unwrap_or_else(today);
        EventRecord {
            kind: RecordKind::Meeting,
            backend_id: BackendId::Text(rec.id.clone()),
            title: rec
                .title
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| RecordKind::Meeting.display_label().to_string()),
            date,
            location: rec.location.clone(),
            time_range: None,
            attendee_count: rec.attendee_count,
            weather: None,
            responsible_unit: None,
            status: None,
            payload: RecordPayload::Meeting(rec),
        }
    }

    /// Issue status, if this record is an issue.
    pub fn issue_status(&self) -> Option<IssueStatus> {
        match self.status {
            Some(RecordStatus::Issue(s)) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a backend timestamp leniently.
///
/// Accepts RFC 3339 (with offset or `Z`), bare `YYYY-MM-DDTHH:MM[:SS]`, and
/// `YYYY-MM-DD HH:MM[:SS]`.
fn parse_datetime(value: Option<&str>) -> Option<chrono::NaiveDateTime> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    None
}

/// Calendar date of a backend timestamp, or today when missing/unparseable.
fn parse_date(value: Option<&str>) -> NaiveDate {
    if let Some(dt) = parse_datetime(value) {
        return dt.date();
    }
    // Some rows carry a bare date.
    value
        .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
        .unwrap_or_else(today)
}

/// Accepts an array of URLs, a comma-joined string, or an array containing
/// one comma-joined string.
fn deserialize_images<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Many(Vec<String>),
        One(String),
    }

    let split = |s: &str| -> Vec<String> {
        s.split(',')
            .map(|part| part.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
            .filter(|part| !part.is_empty())
            .collect()
    };

    match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Many(urls)) if urls.len() == 1 && urls[0].contains(',') => Ok(split(&urls[0])),
        Some(Raw::Many(urls)) => Ok(urls),
        Some(Raw::One(s)) => Ok(split(&s)),
        None => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::RecordStatus;

    #[test]
    fn issue_normalization_fills_defaults() {
        let rec = EventRecord::from_issue(IssueRecord {
            id: Some(7),
            ..Default::default()
        });
        assert_eq!(rec.kind, RecordKind::Issue);
        assert_eq!(rec.backend_id, BackendId::Numeric(7));
        assert_eq!(rec.title, "问题记录");
        assert_eq!(rec.date, Utc::now().date_naive());
        assert_eq!(
            rec.status,
            Some(RecordStatus::Issue(IssueStatus::Pending))
        );
        assert_eq!(rec.responsible_unit.as_deref(), Some("施工单位"));
    }

    #[test]
    fn issue_normalization_maps_status_label() {
        let rec = EventRecord::from_issue(IssueRecord {
            id: Some(1),
            description: Some("基坑积水".into()),
            status: Some("处理中".into()),
            record_time: Some("2025-05-10T08:30:00Z".into()),
            ..Default::default()
        });
        assert_eq!(rec.title, "基坑积水");
        assert_eq!(rec.date, NaiveDate::from_ymd_opt(2025, 5, 10).unwrap());
        assert_eq!(rec.issue_status(), Some(IssueStatus::Processing));
    }

    #[test]
    fn supervision_normalization_builds_time_range() {
        let rec = EventRecord::from_supervision(SupervisionRecord {
            id: Some(3),
            project_name: Some("某某工程".into()),
            standby_unit: Some("第三监理站".into()),
            start_datetime: Some("2025-05-10T08:00:00".into()),
            end_datetime: Some("2025-05-10T11:30:00".into()),
            ..Default::default()
        });
        assert_eq!(rec.title, "某某工程");
        assert_eq!(rec.time_range.as_deref(), Some("08:00 - 11:30"));
        assert_eq!(rec.location.as_deref(), Some("第三监理站"));
    }

    #[test]
    fn supervision_normalization_defaults_title_and_location() {
        let rec = EventRecord::from_supervision(SupervisionRecord {
            id: Some(4),
            ..Default::default()
        });
        assert_eq!(rec.title, "旁站记录");
        assert_eq!(rec.location.as_deref(), Some("未设置位置"));
        assert!(rec.time_range.is_none());
    }

    #[test]
    fn daily_log_title_defaults_to_dated_label() {
        let rec = EventRecord::from_daily_log(DailyLogRecord {
            id: "log-1".into(),
            date: Some("2025-05-10".into()),
            ..Default::default()
        });
        assert_eq!(rec.title, "监理日志 - 2025-05-10");
        assert_eq!(rec.backend_id, BackendId::Text("log-1".into()));
    }

    #[test]
    fn images_accept_array_string_and_joined_forms() {
        let many: IssueRecord =
            serde_json::from_str(r#"{"images": ["http://a/1.png", "http://a/2.png"]}"#).unwrap();
        assert_eq!(many.images.len(), 2);

        let joined: IssueRecord =
            serde_json::from_str(r#"{"images": "http://a/1.png, http://a/2.png"}"#).unwrap();
        assert_eq!(joined.images, vec!["http://a/1.png", "http://a/2.png"]);

        let wrapped: IssueRecord =
            serde_json::from_str(r#"{"images": ["http://a/1.png,http://a/2.png"]}"#).unwrap();
        assert_eq!(wrapped.images.len(), 2);

        let absent: IssueRecord = serde_json::from_str(r#"{}"#).unwrap();
        assert!(absent.images.is_empty());
    }

    #[test]
    fn kind_tokens_round_trip() {
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::from_token(kind.token()), Some(kind));
        }
        assert_eq!(RecordKind::from_token("inspection"), None);
    }
}
