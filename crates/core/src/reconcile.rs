//! Merging kind-partitioned record sources into one addressable list.
//!
//! Each record kind is fetched independently; [`reconcile`] concatenates
//! the per-kind lists in a fixed priority order (issues, stand-by records,
//! daily logs, meeting minutes) and assigns every record a unique
//! [`DisplayKey`]. Stale pagination can hand us the same backend row twice;
//! instead of silently overwriting, the second occurrence gets a collision
//! suffix so both stay addressable until a reload collapses them.
//!
//! The collision suffix is a sequence number local to one `reconcile` call,
//! so identical input always yields identical keys across re-renders.

use std::collections::HashMap;

use crate::key::DisplayKey;
use crate::record::{EventRecord, RecordKind};
use crate::status::IssueStatus;

/// One merged record: the assigned key plus the normalized record.
#[derive(Debug, Clone)]
pub struct ReconciledRecord {
    pub key: DisplayKey,
    pub record: EventRecord,
}

/// Merge kind-partitioned sources into a single keyed list.
///
/// `sources` must be given in merge priority order; callers normally pass
/// `[issues, supervision, daily_logs, meetings]`. Every input record appears
/// exactly once in the output — collisions are disambiguated, never dropped.
pub fn reconcile(sources: Vec<Vec<EventRecord>>) -> Vec<ReconciledRecord> {
    let mut seen: HashMap<String, u32> = HashMap::new();
    let mut merged = Vec::with_capacity(sources.iter().map(Vec::len).sum());

    for record in sources.into_iter().flatten() {
        let base = DisplayKey::new(record.kind, record.backend_id.clone());
        let occurrences = seen.entry(base.to_string()).or_insert(0);
        let key = if *occurrences == 0 {
            base
        } else {
            tracing::warn!(
                key = %base,
                occurrence = *occurrences + 1,
                "Duplicate record identity across sources; keeping both"
            );
            DisplayKey::with_seq(record.kind, record.backend_id.clone(), *occurrences)
        };
        *occurrences += 1;
        merged.push(ReconciledRecord { key, record });
    }

    merged
}

/// Kind filter: everything, or one specific kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Kind(RecordKind),
}

/// Status filter. Only issue records carry a filterable status; for every
/// other kind the filter is a no-op even when set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Issue(IssueStatus),
}

/// Apply type and status filters. Pure: the input list is left untouched.
pub fn filter(
    records: &[ReconciledRecord],
    type_filter: TypeFilter,
    status_filter: StatusFilter,
) -> Vec<ReconciledRecord> {
    records
        .iter()
        .filter(|entry| {
            let kind_ok = match type_filter {
                TypeFilter::All => true,
                TypeFilter::Kind(kind) => entry.record.kind == kind,
            };
            if !kind_ok {
                return false;
            }
            match (entry.record.kind, status_filter) {
                (RecordKind::Issue, StatusFilter::Issue(wanted)) => {
                    entry.record.issue_status() == Some(wanted)
                }
                _ => true,
            }
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BackendId, IssueRecord, SupervisionRecord};

    fn issue(id: i64, status: &str) -> EventRecord {
        EventRecord::from_issue(IssueRecord {
            id: Some(id),
            description: Some(format!("问题 {id}")),
            status: Some(status.to_string()),
            ..Default::default()
        })
    }

    fn supervision(id: i64) -> EventRecord {
        EventRecord::from_supervision(SupervisionRecord {
            id: Some(id),
            ..Default::default()
        })
    }

    #[test]
    fn keys_are_pairwise_distinct_and_nothing_is_dropped() {
        let merged = reconcile(vec![
            vec![issue(1, "待处理"), issue(1, "处理中"), issue(2, "待处理")],
            vec![supervision(1), supervision(1)],
        ]);
        assert_eq!(merged.len(), 5);

        let mut keys: Vec<String> = merged.iter().map(|r| r.key.to_string()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 5, "display keys must be pairwise distinct");
    }

    #[test]
    fn duplicate_identity_gets_sequence_suffix() {
        // Same backend id seen in two stale paginated responses.
        let merged = reconcile(vec![vec![issue(1, "待处理"), issue(1, "已闭环")]]);
        assert_eq!(merged[0].key.to_string(), "issue-1");
        assert_eq!(merged[1].key.to_string(), "issue-1~1");
    }

    #[test]
    fn keys_are_stable_across_identical_inputs() {
        let build = || {
            reconcile(vec![vec![issue(1, "待处理"), issue(1, "待处理")], vec![supervision(9)]])
                .iter()
                .map(|r| r.key.to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn same_numeric_id_across_kinds_does_not_collide() {
        let merged = reconcile(vec![vec![issue(5, "待处理")], vec![supervision(5)]]);
        assert_eq!(merged[0].key.to_string(), "issue-5");
        assert_eq!(merged[1].key.to_string(), "supervision-5");
    }

    fn daily_log(id: &str) -> EventRecord {
        EventRecord::from_daily_log(crate::record::DailyLogRecord {
            id: id.to_string(),
            date: Some("2025-05-10".into()),
            ..Default::default()
        })
    }

    #[test]
    fn duplicate_text_identity_stays_recoverable() {
        // Text ids contain dashes; the suffix separator must not be
        // swallowed into the id on the way back.
        let merged = reconcile(vec![vec![daily_log("log-1"), daily_log("log-1")]]);
        assert_eq!(merged[0].key.to_string(), "daily-log-log-1");
        assert_eq!(merged[1].key.to_string(), "daily-log-log-1~1");

        for entry in &merged {
            let (kind, id) =
                crate::key::recover_backend_id(&entry.key.to_string()).unwrap();
            assert_eq!(kind, RecordKind::DailyLog);
            assert_eq!(id, entry.record.backend_id);
        }
    }

    #[test]
    fn every_key_recovers_its_backend_identity() {
        let merged = reconcile(vec![
            vec![issue(1, "待处理"), issue(1, "处理中")],
            vec![supervision(1)],
        ]);
        for entry in &merged {
            let (kind, id) =
                crate::key::recover_backend_id(&entry.key.to_string()).unwrap();
            assert_eq!(kind, entry.record.kind);
            assert_eq!(&id, &entry.record.backend_id);
        }
        assert_eq!(
            merged[1].record.backend_id,
            BackendId::Numeric(1),
            "suffixed entry still resolves to the original id"
        );
    }

    #[test]
    fn filter_all_is_identity_and_pure() {
        let merged = reconcile(vec![vec![issue(1, "待处理")], vec![supervision(2)]]);
        let before: Vec<String> = merged.iter().map(|r| r.key.to_string()).collect();

        let filtered = filter(&merged, TypeFilter::All, StatusFilter::All);
        assert_eq!(filtered.len(), merged.len());

        let after: Vec<String> = merged.iter().map(|r| r.key.to_string()).collect();
        assert_eq!(before, after, "filter must not mutate its input");
    }

    #[test]
    fn status_filter_applies_to_issues_only() {
        let merged = reconcile(vec![
            vec![issue(1, "待处理"), issue(2, "已闭环")],
            vec![supervision(3)],
        ]);
        let filtered = filter(
            &merged,
            TypeFilter::All,
            StatusFilter::Issue(IssueStatus::Resolved),
        );
        // The resolved issue and the (status-less) supervision record remain.
        assert_eq!(filtered.len(), 2);
        assert!(filtered
            .iter()
            .any(|r| r.record.kind == RecordKind::Supervision));
        assert!(filtered
            .iter()
            .any(|r| r.record.issue_status() == Some(IssueStatus::Resolved)));
    }

    #[test]
    fn type_filter_restricts_to_one_kind() {
        let merged = reconcile(vec![vec![issue(1, "待处理")], vec![supervision(2)]]);
        let filtered = filter(
            &merged,
            TypeFilter::Kind(RecordKind::Supervision),
            StatusFilter::All,
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].record.kind, RecordKind::Supervision);
    }
}
