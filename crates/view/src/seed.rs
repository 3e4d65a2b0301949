//! Locally-seeded demo records.
//!
//! Daily logs and meeting minutes have no live backend feed in this build;
//! the dashboard seeds a fixed set so all four kinds render. Ids are stable
//! (`log-N` / `meeting-N`) so display keys stay the same across renders.

use buildsense_core::record::{DailyLogRecord, EventRecord, MeetingMinutes};

/// The seeded daily supervision logs.
pub fn daily_logs() -> Vec<EventRecord> {
    vec![
        EventRecord::from_daily_log(DailyLogRecord {
            id: "log-1".into(),
            title: Some("监理日志 - 2025-05-10".into()),
            date: Some("2025-05-10".into()),
            project_name: Some("某某建设工程".into()),
            weather: Some("晴".into()),
            temperature: Some("20-28℃".into()),
            ..Default::default()
        }),
        EventRecord::from_daily_log(DailyLogRecord {
            id: "log-2".into(),
            title: Some("监理日志 - 2025-05-11".into()),
            date: Some("2025-05-11".into()),
            project_name: Some("某某建设工程".into()),
            weather: Some("多云".into()),
            temperature: Some("18-25℃".into()),
            ..Default::default()
        }),
    ]
}

/// The seeded meeting minutes.
pub fn meeting_minutes() -> Vec<EventRecord> {
    vec![
        EventRecord::from_meeting(MeetingMinutes {
            id: "meeting-1".into(),
            title: Some("项目例会".into()),
            date: Some("2025-05-10".into()),
            attendee_count: Some(12),
            location: Some("项目部会议室".into()),
            meeting_name: Some("某某工程第1次监理例会".into()),
            host: Some("张三（总监）".into()),
            recorder: Some("李四（监理员）".into()),
        }),
        EventRecord::from_meeting(MeetingMinutes {
            id: "meeting-2".into(),
            title: Some("质量专题会".into()),
            date: Some("2025-05-12".into()),
            attendee_count: Some(8),
            location: Some("项目部会议室".into()),
            meeting_name: Some("混凝土质量专题会".into()),
            host: Some("张三（总监）".into()),
            recorder: Some("李四（监理员）".into()),
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildsense_core::RecordKind;

    #[test]
    fn seeds_have_stable_kinds_and_ids() {
        let logs = daily_logs();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|r| r.kind == RecordKind::DailyLog));

        let meetings = meeting_minutes();
        assert_eq!(meetings.len(), 2);
        assert!(meetings.iter().all(|r| r.kind == RecordKind::Meeting));
        assert_eq!(meetings[0].attendee_count, Some(12));
    }
}
