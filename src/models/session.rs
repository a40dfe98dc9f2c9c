use std::collections::HashSet;
use std::time::Instant;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{ChatMessage, Language, ReplyKind, Topic};

/// Per-session facts that condition response selection. `questions_asked`
/// and `shows_interest` only ever grow; captured contact fields are set at
/// most once, by a lead submission.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub language: Language,
    pub visit_started: Instant,
    /// Seconds the visitor spent on the page before the widget opened,
    /// reported by the client at session creation. Only the welcome
    /// message wording depends on it.
    pub page_seconds: u64,
    pub questions_asked: u32,
    pub shows_interest: bool,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl SessionContext {
    pub fn new(language: Language, page_seconds: u64) -> Self {
        Self {
            language,
            visit_started: Instant::now(),
            page_seconds,
            questions_asked: 0,
            shows_interest: false,
            name: None,
            email: None,
            phone: None,
        }
    }

    /// Monotonically non-decreasing; derived, never stored.
    pub fn visit_duration_seconds(&self) -> u64 {
        self.page_seconds + self.visit_started.elapsed().as_secs()
    }
}

/// One widget conversation. Lives in memory only; created on widget mount,
/// discarded on teardown or idle expiry. Conversation memory
/// (`topics_discussed`, `last_reply`) is scoped here so concurrent sessions
/// can never bleed into each other.
#[derive(Debug)]
pub struct ChatSession {
    pub id: String,
    pub context: SessionContext,
    pub messages: Vec<ChatMessage>,
    pub topics_discussed: HashSet<Topic>,
    pub last_reply: Option<ReplyKind>,
    pub reply_pending: bool,
    pub expires_at: NaiveDateTime,
}

impl ChatSession {
    pub fn new(id: String, context: SessionContext, ttl_minutes: i64) -> Self {
        Self {
            id,
            context,
            messages: vec![],
            topics_discussed: HashSet::new(),
            last_reply: None,
            reply_pending: false,
            expires_at: chrono::Utc::now().naive_utc() + chrono::Duration::minutes(ttl_minutes),
        }
    }

    /// Push the idle expiry forward; called on every session interaction.
    pub fn touch(&mut self, ttl_minutes: i64) {
        self.expires_at = chrono::Utc::now().naive_utc() + chrono::Duration::minutes(ttl_minutes);
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= chrono::Utc::now().naive_utc()
    }
}

/// Read-only view returned by `GET /api/chat/session/:id`.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub id: String,
    pub language: Language,
    pub questions_asked: u32,
    pub shows_interest: bool,
    pub name: Option<String>,
    pub visit_duration_seconds: u64,
    pub messages: Vec<ChatMessage>,
}

impl SessionSnapshot {
    pub fn of(session: &ChatSession) -> Self {
        Self {
            id: session.id.clone(),
            language: session.context.language,
            questions_asked: session.context.questions_asked,
            shows_interest: session.context.shows_interest,
            name: session.context.name.clone(),
            visit_duration_seconds: session.context.visit_duration_seconds(),
            messages: session.messages.clone(),
        }
    }
}
