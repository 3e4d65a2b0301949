//! User-action orchestrations.
//!
//! Each flow ties the view state to the REST client (and the local document
//! generator) for one user action: load a source, save an edit, delete,
//! merge, generate a document. Flows own the notification discipline —
//! every mutation emits exactly one terminal notification, and mutations
//! finish by reloading the affected source so the list reflects the
//! backend's truth rather than an optimistic patch.
//!
//! Identity recovery happens here, before any network call: a display key
//! that does not parse back to an issue id is a local bug and is reported
//! without touching the server.

use std::path::{Path, PathBuf};

use buildsense_client::issues::IssueWrite;
use buildsense_client::{IssuesApi, Notification, Notifier, SupervisionApi};
use buildsense_core::key::recover_backend_id;
use buildsense_core::record::{BackendId, EventRecord, RecordKind, SupervisionRecord};
use buildsense_core::types::DbId;
use buildsense_core::CoreError;
use buildsense_docgen::{generate_standby_document, save_document, standby_filename, SupervisionDocData};

use crate::state::EventsView;

/// Page size for source loads. The dashboard renders everything it gets;
/// paging beyond the first page is not wired up yet.
const PAGE_LIMIT: u32 = 100;

/// Resolve a display key to an issue backend id, or explain why not.
pub fn issue_id_from_key(key: &str) -> Result<DbId, CoreError> {
    match recover_backend_id(key)? {
        (RecordKind::Issue, BackendId::Numeric(id)) => Ok(id),
        (kind, _) => Err(CoreError::KindNotSupported { kind: kind.token() }),
    }
}

// ---------------------------------------------------------------------------
// Source loads
// ---------------------------------------------------------------------------

/// Fetch the issue source, honoring the view's status filter server-side.
///
/// On failure the source slot records the error and keeps its last rows;
/// the other sources are untouched.
pub async fn load_issues(view: &mut EventsView, api: &IssuesApi, notifier: &impl Notifier) {
    view.begin_load(RecordKind::Issue);
    match api.list(0, PAGE_LIMIT, view.issue_status_param(), None).await {
        Ok(rows) => {
            let records: Vec<EventRecord> = rows.into_iter().map(EventRecord::from_issue).collect();
            tracing::debug!(count = records.len(), "Loaded issue records");
            view.apply_success(RecordKind::Issue, records);
        }
        Err(err) => {
            let message = err.to_string();
            view.apply_failure(RecordKind::Issue, message.clone());
            notifier.error(Notification::new("加载失败", message));
        }
    }
}

/// Fetch the stand-by supervision source.
pub async fn load_supervision(
    view: &mut EventsView,
    api: &SupervisionApi,
    notifier: &impl Notifier,
) {
    view.begin_load(RecordKind::Supervision);
    match api.list(0, PAGE_LIMIT).await {
        Ok(rows) => {
            let records: Vec<EventRecord> = rows
                .into_iter()
                .map(EventRecord::from_supervision)
                .collect();
            tracing::debug!(count = records.len(), "Loaded stand-by records");
            view.apply_success(RecordKind::Supervision, records);
        }
        Err(err) => {
            let message = err.to_string();
            view.apply_failure(RecordKind::Supervision, message.clone());
            notifier.error(Notification::new("加载失败", message));
        }
    }
}

// ---------------------------------------------------------------------------
// Issue mutations
// ---------------------------------------------------------------------------

/// Create an issue, then reload the issue source.
pub async fn create_issue(
    view: &mut EventsView,
    api: &IssuesApi,
    notifier: &impl Notifier,
    draft: IssueWrite,
) {
    match api.create(&draft).await {
        Ok(_) => {
            notifier.success(Notification::new("创建成功", "问题记录已创建"));
            view.close_dialog();
            reload_issues(view, api).await;
        }
        Err(err) => notifier.error(Notification::new("创建失败", err.to_string())),
    }
}

/// Save an edit to the issue addressed by `key`, then reload.
pub async fn save_issue_edit(
    view: &mut EventsView,
    api: &IssuesApi,
    notifier: &impl Notifier,
    key: &str,
    draft: IssueWrite,
) {
    let id = match issue_id_from_key(key) {
        Ok(id) => id,
        Err(err) => {
            notifier.error(Notification::new("保存失败", err.to_string()));
            return;
        }
    };
    match api.update(id, &draft).await {
        Ok(_) => {
            notifier.success(Notification::new("保存成功", "问题记录已更新"));
            view.close_dialog();
            reload_issues(view, api).await;
        }
        Err(err) => notifier.error(Notification::new("保存失败", err.to_string())),
    }
}

/// Delete the issue addressed by `key`, then reload.
pub async fn delete_issue(
    view: &mut EventsView,
    api: &IssuesApi,
    notifier: &impl Notifier,
    key: &str,
) {
    let id = match issue_id_from_key(key) {
        Ok(id) => id,
        Err(err) => {
            notifier.error(Notification::new("删除失败", err.to_string()));
            return;
        }
    };
    match api.delete(id).await {
        Ok(()) => {
            notifier.success(Notification::new("删除成功", "问题记录已删除"));
            view.close_dialog();
            reload_issues(view, api).await;
        }
        Err(err) => notifier.error(Notification::new("删除失败", err.to_string())),
    }
}

/// Merge the currently selected issues into one backend row.
///
/// Requires at least two selected issues; the selection is cleared and the
/// issue source reloaded after a successful merge.
pub async fn merge_selected(view: &mut EventsView, api: &IssuesApi, notifier: &impl Notifier) {
    let ids = match view.selected_issue_ids() {
        Ok(ids) => ids,
        Err(err) => {
            notifier.error(Notification::new("合并失败", err.to_string()));
            return;
        }
    };
    if ids.len() < 2 {
        notifier.error(Notification::new("合并失败", "请至少选择两条问题记录"));
        return;
    }
    let count = ids.len();
    match api.merge(&ids).await {
        Ok(merged) => {
            tracing::info!(
                merged_id = merged.merged_issue.id,
                source_count = count,
                "Merged issue records"
            );
            notifier.success(Notification::new(
                "合并成功",
                format!("已成功合并 {count} 个问题记录"),
            ));
            view.clear_selection();
            view.close_dialog();
            reload_issues(view, api).await;
        }
        Err(err) => notifier.error(Notification::new("合并失败", err.to_string())),
    }
}

/// Ask the backend to generate the rectification-notice DOCX for one issue.
///
/// Returns the hosted document URL on success so the host can trigger the
/// download.
pub async fn generate_issue_document(
    api: &IssuesApi,
    notifier: &impl Notifier,
    key: &str,
) -> Option<String> {
    let id = match issue_id_from_key(key) {
        Ok(id) => id,
        Err(err) => {
            notifier.error(Notification::new("生成失败", err.to_string()));
            return None;
        }
    };
    match api.generate_document(id).await {
        Ok(doc) => {
            notifier.success(Notification::new("生成成功", "整改通知单已生成"));
            Some(doc.doc_url)
        }
        Err(err) => {
            notifier.error(Notification::new("生成失败", err.to_string()));
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Stand-by document generation (local)
// ---------------------------------------------------------------------------

/// Generate the stand-by record DOCX locally and save it under `out_dir`.
///
/// Rendering is pure; only the final save touches the filesystem. Returns
/// the written path on success.
pub fn export_standby_document(
    record: &SupervisionRecord,
    out_dir: &Path,
    notifier: &impl Notifier,
) -> Option<PathBuf> {
    let data = SupervisionDocData::from(record);
    let filename = standby_filename(&data);
    let result =
        generate_standby_document(&data).and_then(|bytes| save_document(out_dir, &filename, &bytes));
    match result {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Generated stand-by document");
            notifier.success(Notification::new(
                "生成成功",
                format!("旁站记录文档已保存为 {filename}"),
            ));
            Some(path)
        }
        Err(err) => {
            notifier.error(Notification::new("生成失败", err.to_string()));
            None
        }
    }
}

async fn reload_issues(view: &mut EventsView, api: &IssuesApi) {
    view.begin_load(RecordKind::Issue);
    match api.list(0, PAGE_LIMIT, view.issue_status_param(), None).await {
        Ok(rows) => {
            let records = rows.into_iter().map(EventRecord::from_issue).collect();
            view.apply_success(RecordKind::Issue, records);
        }
        // The mutation already reported its outcome; a failed refresh only
        // marks the source, it does not raise a second notification.
        Err(err) => view.apply_failure(RecordKind::Issue, err.to_string()),
    }
}
