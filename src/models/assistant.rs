use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Casual,
    Formal,
    Urgent,
    Friendly,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Casual => "casual",
            Tone::Formal => "formal",
            Tone::Urgent => "urgent",
            Tone::Friendly => "friendly",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Sms,
    Email,
    Whatsapp,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Sms => "sms",
            Channel::Email => "email",
            Channel::Whatsapp => "whatsapp",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationRequest {
    pub idea: String,
    pub tone: Tone,
    pub channel: Channel,
}

/// One candidate campaign message produced by the assistant.
#[derive(Debug, Clone, Serialize)]
pub struct MessageVariant {
    pub id: String,
    pub content: String,
    pub tone: Tone,
    pub channel: Channel,
}
