use serde::{Deserialize, Serialize};

/// Broadcast to dashboard SSE subscribers whenever the widget does
/// something worth showing live.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub session_id: String,
    pub kind: ActivityKind,
    pub summary: String,
    pub created_at: String,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    SessionStarted,
    MessageHandled,
    LeadCaptured,
    BookingScheduled,
}
