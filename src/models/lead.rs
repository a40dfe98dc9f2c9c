use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Contact details captured by the in-chat lead form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: String,
    pub session_id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: NaiveDateTime,
}

/// A demo slot picked in the in-chat booking form. Stored as the visitor
/// typed it; no calendar math happens on this side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: String,
    pub session_id: String,
    pub date: String,
    pub time: String,
    pub timezone: String,
    pub created_at: NaiveDateTime,
}
