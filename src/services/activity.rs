use std::sync::Arc;

use crate::models::{ActivityEvent, ActivityKind};
use crate::state::AppState;

/// Push one event to dashboard SSE subscribers; dropped silently when the
/// dashboard is not open.
pub fn record_activity(state: &Arc<AppState>, session_id: &str, kind: ActivityKind, summary: &str) {
    let event = ActivityEvent {
        session_id: session_id.to_string(),
        kind,
        summary: summary.to_string(),
        created_at: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    let _ = state.activity_tx.send(event);
}
