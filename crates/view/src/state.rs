//! The events dashboard state object.

use std::collections::BTreeMap;

use buildsense_core::key::recover_backend_id;
use buildsense_core::record::{BackendId, EventRecord, RecordKind};
use buildsense_core::status::IssueStatus;
use buildsense_core::types::DbId;
use buildsense_core::{
    filter, reconcile, CoreError, DisplayKey, ReconciledRecord, SelectionSet, StatusFilter,
    TypeFilter,
};

use crate::seed;

/// Load state of one record-kind source.
///
/// Sources fail independently: a failure keeps the last successfully
/// loaded rows so the rest of the view is left unchanged (no partial
/// merge), and records the error message for display.
#[derive(Debug, Clone)]
pub enum SourceState {
    Idle,
    Loading { last: Vec<EventRecord> },
    Loaded(Vec<EventRecord>),
    Failed { message: String, last: Vec<EventRecord> },
}

impl SourceState {
    /// Rows this source currently contributes to the merged list.
    pub fn records(&self) -> &[EventRecord] {
        match self {
            SourceState::Idle => &[],
            SourceState::Loading { last } => last,
            SourceState::Loaded(records) => records,
            SourceState::Failed { last, .. } => last,
        }
    }

    fn take_records(&mut self) -> Vec<EventRecord> {
        match std::mem::replace(self, SourceState::Idle) {
            SourceState::Idle => Vec::new(),
            SourceState::Loading { last } => last,
            SourceState::Loaded(records) => records,
            SourceState::Failed { last, .. } => last,
        }
    }
}

/// Which dialog is open. At most one at a time, by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveDialog {
    #[default]
    None,
    IssueDetail,
    IssueEdit,
    IssueCreate,
    NotificationGenerate,
    SupervisionDetail,
    SupervisionEdit,
    DailyLogDetail,
    DailyLogEdit,
    MeetingDetail,
    MeetingEdit,
    MergeConfirm,
    InspectionConfirm,
}

/// State of the events dashboard for one render cycle.
#[derive(Debug)]
pub struct EventsView {
    sources: BTreeMap<RecordKind, SourceState>,
    type_filter: TypeFilter,
    status_filter: StatusFilter,
    selection: SelectionSet,
    active_dialog: ActiveDialog,
    focused: Option<DisplayKey>,
}

impl Default for EventsView {
    fn default() -> Self {
        Self::new()
    }
}

impl EventsView {
    /// Fresh view: issues and supervision start idle, daily logs and
    /// meeting minutes carry their local seeds.
    pub fn new() -> Self {
        let mut sources = BTreeMap::new();
        sources.insert(RecordKind::Issue, SourceState::Idle);
        sources.insert(RecordKind::Supervision, SourceState::Idle);
        sources.insert(RecordKind::DailyLog, SourceState::Loaded(seed::daily_logs()));
        sources.insert(
            RecordKind::Meeting,
            SourceState::Loaded(seed::meeting_minutes()),
        );
        EventsView {
            sources,
            type_filter: TypeFilter::All,
            status_filter: StatusFilter::All,
            selection: SelectionSet::new(),
            active_dialog: ActiveDialog::None,
            focused: None,
        }
    }

    // -- source slots -------------------------------------------------------

    /// Mark a source as loading, keeping its current rows visible.
    pub fn begin_load(&mut self, kind: RecordKind) {
        let slot = self.sources.entry(kind).or_insert(SourceState::Idle);
        let last = slot.take_records();
        *slot = SourceState::Loading { last };
    }

    /// Install a source's freshly fetched (already normalized) rows.
    ///
    /// Only this kind's partition changes; the other sources are
    /// untouched. The selection is pruned against the new visible list.
    pub fn apply_success(&mut self, kind: RecordKind, records: Vec<EventRecord>) {
        self.sources.insert(kind, SourceState::Loaded(records));
        self.prune_selection();
    }

    /// Record a source's fetch failure without disturbing the others.
    pub fn apply_failure(&mut self, kind: RecordKind, message: String) {
        tracing::warn!(kind = %kind, error = %message, "Record source failed to load");
        let slot = self.sources.entry(kind).or_insert(SourceState::Idle);
        let last = slot.take_records();
        *slot = SourceState::Failed { message, last };
    }

    /// The load state of one source, for spinners and inline errors.
    pub fn source(&self, kind: RecordKind) -> &SourceState {
        &self.sources[&kind]
    }

    // -- derived list -------------------------------------------------------

    /// The merged, filtered list for the current render.
    ///
    /// Recomputed from the source slots on every call, so sources may
    /// resolve in any order.
    pub fn visible(&self) -> Vec<ReconciledRecord> {
        let sources = RecordKind::ALL
            .iter()
            .map(|kind| self.sources[kind].records().to_vec())
            .collect();
        filter(&reconcile(sources), self.type_filter, self.status_filter)
    }

    // -- filters ------------------------------------------------------------

    pub fn type_filter(&self) -> TypeFilter {
        self.type_filter
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    /// Issue status to request server-side, if the filter asks for one.
    pub fn issue_status_param(&self) -> Option<IssueStatus> {
        match self.status_filter {
            StatusFilter::Issue(status) => Some(status),
            StatusFilter::All => None,
        }
    }

    /// Change the kind filter.
    ///
    /// Clears the selection; selecting a kind without status support also
    /// resets the status filter.
    pub fn set_type_filter(&mut self, type_filter: TypeFilter) {
        self.type_filter = type_filter;
        if !matches!(type_filter, TypeFilter::All | TypeFilter::Kind(RecordKind::Issue)) {
            self.status_filter = StatusFilter::All;
        }
        self.selection.clear();
    }

    /// Change the status filter. Clears the selection.
    pub fn set_status_filter(&mut self, status_filter: StatusFilter) {
        self.status_filter = status_filter;
        self.selection.clear();
    }

    // -- selection ----------------------------------------------------------

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Toggle a record in the batch selection.
    ///
    /// Rejected for non-issue kinds.
    pub fn toggle_selection(&mut self, key: &DisplayKey) -> Result<(), CoreError> {
        if self.selection.toggle(key) {
            Ok(())
        } else {
            Err(CoreError::KindNotSupported {
                kind: key.kind().token(),
            })
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn prune_selection(&mut self) {
        let visible = self.visible();
        self.selection.prune(&visible);
    }

    /// Backend ids of all selected issues, recovered from their keys.
    ///
    /// Fails with `InvalidIdentifier` before any of them reach the
    /// network if even one key is malformed.
    pub fn selected_issue_ids(&self) -> Result<Vec<DbId>, CoreError> {
        self.selection
            .keys()
            .map(|key| {
                let key_str = key.to_string();
                match recover_backend_id(&key_str)? {
                    (RecordKind::Issue, BackendId::Numeric(id)) => Ok(id),
                    _ => Err(CoreError::InvalidIdentifier {
                        key: key_str,
                        reason: "selection may only contain issue records".into(),
                    }),
                }
            })
            .collect()
    }

    // -- dialogs & focus ----------------------------------------------------

    pub fn active_dialog(&self) -> ActiveDialog {
        self.active_dialog
    }

    pub fn focused(&self) -> Option<&DisplayKey> {
        self.focused.as_ref()
    }

    /// The focused record, looked up in the current visible list.
    pub fn focused_record(&self) -> Option<ReconciledRecord> {
        let key = self.focused.as_ref()?;
        self.visible().into_iter().find(|r| &r.key == key)
    }

    /// Open the detail dialog for a record.
    pub fn open_detail(&mut self, key: DisplayKey) {
        self.active_dialog = match key.kind() {
            RecordKind::Issue => ActiveDialog::IssueDetail,
            RecordKind::Supervision => ActiveDialog::SupervisionDetail,
            RecordKind::DailyLog => ActiveDialog::DailyLogDetail,
            RecordKind::Meeting => ActiveDialog::MeetingDetail,
        };
        self.focused = Some(key);
    }

    /// Whether a record may be edited: resolved issues are read-only,
    /// everything else is editable.
    pub fn can_edit(record: &ReconciledRecord) -> bool {
        record.record.issue_status() != Some(IssueStatus::Resolved)
    }

    /// Open the edit dialog for a record. Returns `false` (leaving the
    /// dialog state unchanged) when the record is not editable.
    pub fn open_edit(&mut self, record: &ReconciledRecord) -> bool {
        if !Self::can_edit(record) {
            return false;
        }
        self.active_dialog = match record.record.kind {
            RecordKind::Issue => ActiveDialog::IssueEdit,
            RecordKind::Supervision => ActiveDialog::SupervisionEdit,
            RecordKind::DailyLog => ActiveDialog::DailyLogEdit,
            RecordKind::Meeting => ActiveDialog::MeetingEdit,
        };
        self.focused = Some(record.key.clone());
        true
    }

    /// Open a standalone dialog (create, merge, notification, ...).
    pub fn open_dialog(&mut self, dialog: ActiveDialog) {
        self.active_dialog = dialog;
    }

    /// Close whatever dialog is open and drop the focus.
    pub fn close_dialog(&mut self) {
        self.active_dialog = ActiveDialog::None;
        self.focused = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildsense_core::record::{IssueRecord, SupervisionRecord};

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
    fn new_view_renders_only_the_seeds() {
        let view = EventsView::new();
        let visible = view.visible();
        assert_eq!(visible.len(), 4);
        assert!(visible
            .iter()
            .all(|r| matches!(r.record.kind, RecordKind::DailyLog | RecordKind::Meeting)));
    }

    #[test]
    fn failed_issue_load_leaves_other_sources_rendering() {
        let mut view = EventsView::new();
        view.apply_success(RecordKind::Supervision, vec![supervision(1)]);

        view.begin_load(RecordKind::Issue);
        view.apply_failure(RecordKind::Issue, "服务器暂时不可用".into());

        let visible = view.visible();
        assert!(visible
            .iter()
            .any(|r| r.record.kind == RecordKind::Supervision));
        assert!(matches!(
            view.source(RecordKind::Issue),
            SourceState::Failed { .. }
        ));
    }

    #[test]
    fn failure_keeps_previously_loaded_rows() {
        let mut view = EventsView::new();
        view.apply_success(RecordKind::Issue, vec![issue(1, "待处理")]);

        view.begin_load(RecordKind::Issue);
        view.apply_failure(RecordKind::Issue, "网络中断".into());

        // Prior rows stay visible; no partial wipe.
        assert!(view
            .visible()
            .iter()
            .any(|r| r.record.kind == RecordKind::Issue));
    }

    #[test]
    fn changing_type_filter_clears_selection_and_resets_status() {
        let mut view = EventsView::new();
        view.apply_success(RecordKind::Issue, vec![issue(1, "待处理")]);
        let key = view.visible()[0].key.clone();
        view.toggle_selection(&key).unwrap();
        assert_eq!(view.selection().len(), 1);

        view.set_type_filter(TypeFilter::Kind(RecordKind::Supervision));
        assert!(view.selection().is_empty());
        assert_eq!(view.status_filter(), StatusFilter::All);

        // Status filter is untouched when staying on issues.
        view.set_type_filter(TypeFilter::Kind(RecordKind::Issue));
        view.set_status_filter(StatusFilter::Issue(IssueStatus::Pending));
        view.set_type_filter(TypeFilter::All);
        assert_eq!(
            view.status_filter(),
            StatusFilter::Issue(IssueStatus::Pending)
        );
    }

    #[test]
    fn selection_rejects_non_issue_records() {
        let mut view = EventsView::new();
        view.apply_success(RecordKind::Supervision, vec![supervision(2)]);
        let key = view
            .visible()
            .iter()
            .find(|r| r.record.kind == RecordKind::Supervision)
            .unwrap()
            .key
            .clone();

        let err = view.toggle_selection(&key).unwrap_err();
        assert!(matches!(err, CoreError::KindNotSupported { .. }));
        assert!(view.selection().is_empty());
    }

    #[test]
    fn reload_prunes_stale_selection_entries() {
        let mut view = EventsView::new();
        view.apply_success(RecordKind::Issue, vec![issue(1, "待处理"), issue(2, "待处理")]);
        for entry in view.visible() {
            if entry.record.kind == RecordKind::Issue {
                view.toggle_selection(&entry.key).unwrap();
            }
        }
        assert_eq!(view.selection().len(), 2);

        // Issue 1 disappears server-side; the reload drops its selection.
        view.apply_success(RecordKind::Issue, vec![issue(2, "待处理")]);
        assert_eq!(view.selection().len(), 1);
    }

    #[test]
    fn selected_issue_ids_recover_backend_ids() {
        let mut view = EventsView::new();
        view.apply_success(RecordKind::Issue, vec![issue(7, "待处理"), issue(9, "处理中")]);
        for entry in view.visible() {
            if entry.record.kind == RecordKind::Issue {
                view.toggle_selection(&entry.key).unwrap();
            }
        }
        let mut ids = view.selected_issue_ids().unwrap();
        ids.sort();
        assert_eq!(ids, vec![7, 9]);
    }

    #[test]
    fn at_most_one_dialog_is_open() {
        let mut view = EventsView::new();
        view.apply_success(RecordKind::Issue, vec![issue(1, "待处理")]);
        let entry = view.visible()[0].clone();

        view.open_detail(entry.key.clone());
        assert_eq!(view.active_dialog(), ActiveDialog::IssueDetail);

        assert!(view.open_edit(&entry));
        assert_eq!(view.active_dialog(), ActiveDialog::IssueEdit);
        assert!(view.focused_record().is_some());

        view.close_dialog();
        assert_eq!(view.active_dialog(), ActiveDialog::None);
        assert!(view.focused().is_none());
    }

    #[test]
    fn resolved_issues_are_not_editable() {
        let mut view = EventsView::new();
        view.apply_success(RecordKind::Issue, vec![issue(1, "已闭环")]);
        let entry = view.visible()[0].clone();

        assert!(!EventsView::can_edit(&entry));
        assert!(!view.open_edit(&entry));
        assert_eq!(view.active_dialog(), ActiveDialog::None);

        // Supervision records are always editable.
        view.apply_success(RecordKind::Supervision, vec![supervision(2)]);
        let entry = view
            .visible()
            .into_iter()
            .find(|r| r.record.kind == RecordKind::Supervision)
            .unwrap();
        assert!(EventsView::can_edit(&entry));
    }
}
