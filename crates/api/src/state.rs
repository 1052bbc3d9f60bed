use std::sync::Arc;

use tokio_util::task::TaskTracker;

use edulead_sheets::SheetStore;

use crate::config::ServerConfig;
use crate::notifications::NotificationSink;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`, and the task
/// tracker clones share one underlying tracker).
#[derive(Clone)]
pub struct AppState {
    /// Spreadsheet backend the lead rows are recorded in.
    pub store: Arc<dyn SheetStore>,
    /// Notification mailer; `None` when SMTP is not configured, in
    /// which case submissions succeed silently without emails.
    pub notifier: Option<Arc<dyn NotificationSink>>,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Tracks detached notification sends so shutdown can drain them.
    pub tracker: TaskTracker,
}
