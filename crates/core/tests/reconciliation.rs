//! End-to-end reconciliation properties: normalize → reconcile → filter →
//! select → recover, across all four record kinds.

use buildsense_core::record::{
    DailyLogRecord, EventRecord, IssueRecord, MeetingMinutes, SupervisionRecord,
};
use buildsense_core::{
    filter, key, reconcile, BackendId, IssueStatus, RecordKind, SelectionSet, StatusFilter,
    TypeFilter,
};

fn issue(id: i64, status: &str) -> EventRecord {
    EventRecord::from_issue(IssueRecord {
        id: Some(id),
        description: Some(format!("问题 {id}")),
        status: Some(status.to_string()),
        record_time: Some("2025-05-10T08:00:00Z".to_string()),
        ..Default::default()
    })
}

fn all_sources() -> Vec<Vec<EventRecord>> {
    vec![
        vec![issue(1, "待处理"), issue(2, "处理中")],
        vec![EventRecord::from_supervision(SupervisionRecord {
            id: Some(1),
            project_name: Some("某某工程".into()),
            ..Default::default()
        })],
        vec![EventRecord::from_daily_log(DailyLogRecord {
            id: "log-1".into(),
            date: Some("2025-05-10".into()),
            ..Default::default()
        })],
        vec![EventRecord::from_meeting(MeetingMinutes {
            id: "meeting-1".into(),
            title: Some("项目例会".into()),
            date: Some("2025-05-10".into()),
            attendee_count: Some(12),
            ..Default::default()
        })],
    ]
}

// ---------------------------------------------------------------------------
// Merge order and identity
// ---------------------------------------------------------------------------

#[test]
fn merge_preserves_priority_order_across_kinds() {
    let merged = reconcile(all_sources());
    let kinds: Vec<RecordKind> = merged.iter().map(|r| r.record.kind).collect();
    assert_eq!(
        kinds,
        vec![
            RecordKind::Issue,
            RecordKind::Issue,
            RecordKind::Supervision,
            RecordKind::DailyLog,
            RecordKind::Meeting,
        ]
    );
}

#[test]
fn every_merged_key_is_recoverable() {
    let merged = reconcile(all_sources());
    for entry in &merged {
        let (kind, id) = key::recover_backend_id(&entry.key.to_string()).unwrap();
        assert_eq!(kind, entry.record.kind);
        assert_eq!(&id, &entry.record.backend_id);
    }
}

// ---------------------------------------------------------------------------
// Stale-pagination scenario
// ---------------------------------------------------------------------------

// Two fetches of issue id 1 straddle an edit: the stale row and the current
// row must both stay addressable until a reload collapses them.
#[test]
fn stale_duplicate_rows_stay_individually_addressable() {
    let before_edit = issue(1, "待处理");
    let after_edit = issue(1, "处理中");

    let merged = reconcile(vec![vec![before_edit, after_edit]]);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].key.to_string(), "issue-1");
    assert_eq!(merged[1].key.to_string(), "issue-1~1");

    // Both resolve to the same backend row for mutation purposes.
    for entry in &merged {
        let (_, id) = key::recover_backend_id(&entry.key.to_string()).unwrap();
        assert_eq!(id, BackendId::Numeric(1));
    }

    // A clean reload collapses them back to one entry.
    let reloaded = reconcile(vec![vec![issue(1, "处理中")]]);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].key.to_string(), "issue-1");
}

// Daily logs use text ids that themselves contain dashes, so the collision
// suffix must survive the round trip without being absorbed into the id.
#[test]
fn duplicate_daily_log_keys_recover_the_original_text_id() {
    let log = |id: &str| {
        EventRecord::from_daily_log(DailyLogRecord {
            id: id.to_string(),
            date: Some("2025-05-10".into()),
            ..Default::default()
        })
    };

    let merged = reconcile(vec![vec![log("log-1"), log("log-1")]]);
    assert_eq!(merged.len(), 2);
    assert_eq!(merged[0].key.to_string(), "daily-log-log-1");
    assert_eq!(merged[1].key.to_string(), "daily-log-log-1~1");

    let (kind, id) = key::recover_backend_id(&merged[1].key.to_string()).unwrap();
    assert_eq!(kind, RecordKind::DailyLog);
    assert_eq!(
        id,
        BackendId::Text("log-1".into()),
        "suffixed text-id key must recover the original id"
    );
}

// ---------------------------------------------------------------------------
// Filter + selection interplay
// ---------------------------------------------------------------------------

#[test]
fn selection_survives_filtering_only_for_visible_issues() {
    let merged = reconcile(all_sources());
    let mut selection = SelectionSet::new();

    // Select both issues.
    selection.toggle(&merged[0].key);
    selection.toggle(&merged[1].key);
    assert_eq!(selection.len(), 2);

    // Narrow to pending issues only; the processing issue disappears.
    let visible = filter(
        &merged,
        TypeFilter::Kind(RecordKind::Issue),
        StatusFilter::Issue(IssueStatus::Pending),
    );
    selection.prune(&visible);

    assert_eq!(selection.len(), 1);
    assert!(selection.contains(&merged[0].key));
}

#[test]
fn filter_with_both_all_returns_equal_content() {
    let merged = reconcile(all_sources());
    let filtered = filter(&merged, TypeFilter::All, StatusFilter::All);

    let original: Vec<String> = merged.iter().map(|r| r.key.to_string()).collect();
    let passed: Vec<String> = filtered.iter().map(|r| r.key.to_string()).collect();
    assert_eq!(original, passed);
}
