//! Notification boundary.
//!
//! Toast presentation belongs to the UI host; the core only decides *what*
//! to announce. The invariant callers must keep: each user-initiated
//! mutation (create/update/delete/merge/generate) emits exactly one
//! terminal notification — success or failure, never both, never neither.

/// One terminal notification for a user-initiated operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Sink for terminal notifications, implemented by the UI host.
pub trait Notifier {
    fn success(&self, notification: Notification);
    fn error(&self, notification: Notification);
}

/// Default sink that logs through `tracing` instead of toasting.
///
/// Useful in tests and headless embeddings.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, notification: Notification) {
        tracing::info!(
            title = %notification.title,
            description = %notification.description,
            "notification"
        );
    }

    fn error(&self, notification: Notification) {
        tracing::warn!(
            title = %notification.title,
            description = %notification.description,
            "notification"
        );
    }
}
