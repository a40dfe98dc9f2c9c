use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::Topic;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One transcript entry. Immutable once appended; the transcript is
/// append-only and rendered in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub created_at: NaiveDateTime,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_lead_form: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub show_booking_form: bool,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            sender: Sender::User,
            created_at: chrono::Utc::now().naive_utc(),
            show_lead_form: false,
            show_booking_form: false,
        }
    }

    pub fn bot(text: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            sender: Sender::Bot,
            created_at: chrono::Utc::now().naive_utc(),
            show_lead_form: false,
            show_booking_form: false,
        }
    }
}

/// What kind of reply the bot last gave. Bare "yes"/"no" follow-ups are
/// interpreted relative to this.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Greeting,
    Topic(Topic),
    FollowUp(Topic),
    Conversion,
    Support,
    Fallback,
    LeadPrompt,
    LeadThanks,
    BookingConfirmation,
    Welcome,
}

/// Output of the rule engine for one user message.
#[derive(Debug, Clone)]
pub struct BotReply {
    pub text: String,
    pub show_lead_form: bool,
    pub show_booking_form: bool,
    pub kind: ReplyKind,
}

impl BotReply {
    pub fn plain(text: impl Into<String>, kind: ReplyKind) -> Self {
        Self {
            text: text.into(),
            show_lead_form: false,
            show_booking_form: false,
            kind,
        }
    }

    pub fn with_lead_form(mut self, show: bool) -> Self {
        self.show_lead_form = show;
        self
    }

    pub fn with_booking_form(mut self) -> Self {
        self.show_booking_form = true;
        self
    }

    pub fn into_message(self) -> ChatMessage {
        let mut msg = ChatMessage::bot(&self.text);
        msg.show_lead_form = self.show_lead_form;
        msg.show_booking_form = self.show_booking_form;
        msg
    }
}
