use std::time::Duration;

use async_trait::async_trait;

use crate::models::{Channel, GenerationRequest, MessageVariant, Tone};

/// Produces campaign message drafts for the dashboard's AI assistant panel.
/// The real integration would be an LLM; the shipped implementation is a
/// template expander behind the same trait so the failure path stays
/// testable.
#[async_trait]
pub trait MessageGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<Vec<MessageVariant>>;
}

pub struct MockGenerator {
    /// Simulated upstream latency; zero in tests.
    pub delay_ms: u64,
}

impl MockGenerator {
    pub fn new(delay_ms: u64) -> Self {
        Self { delay_ms }
    }
}

#[async_trait]
impl MessageGenerator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> anyhow::Result<Vec<MessageVariant>> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        let base = base_template(&request.idea, request.tone, request.channel);
        let variants = vec![
            variant(&base, request, "1"),
            variant(&format!("{base} 💫"), request, "2"),
            variant(&format!("{} Thank you!", base.replace('!', ".")), request, "3"),
        ];

        tracing::debug!(
            tone = request.tone.as_str(),
            channel = request.channel.as_str(),
            count = variants.len(),
            "generated message variants"
        );
        Ok(variants)
    }
}

fn variant(content: &str, request: &GenerationRequest, id: &str) -> MessageVariant {
    MessageVariant {
        id: id.to_string(),
        content: content.to_string(),
        tone: request.tone,
        channel: request.channel,
    }
}

fn base_template(idea: &str, tone: Tone, channel: Channel) -> String {
    match (tone, channel) {
        (Tone::Casual, Channel::Sms) => format!("Hey {{customer_name}}! 👋 {idea} Tap here to claim it!"),
        (Tone::Casual, Channel::Email) => {
            format!("Hi {{customer_name}}, hope you're doing well! We've got something special: {idea}")
        }
        (Tone::Casual, Channel::Whatsapp) => {
            format!("Hey there {{customer_name}}! 🎉 {idea} What do you think?")
        }
        (Tone::Formal, Channel::Sms) => {
            format!("Dear {{customer_name}}, {idea} Please reply to accept this offer.")
        }
        (Tone::Formal, Channel::Email) => {
            format!("Dear {{customer_name}}, We are pleased to present: {idea} Kind regards, {{business_name}}")
        }
        (Tone::Formal, Channel::Whatsapp) => {
            format!("Good day {{customer_name}}. {idea} Please let us know if interested.")
        }
        (Tone::Urgent, Channel::Sms) => format!("🚨 {{customer_name}}, LIMITED TIME: {idea} Expires soon!"),
        (Tone::Urgent, Channel::Email) => format!("URGENT: {{customer_name}}, {idea} - Don't miss out!"),
        (Tone::Urgent, Channel::Whatsapp) => {
            format!("⏰ URGENT {{customer_name}}! {idea} Limited availability!")
        }
        (Tone::Friendly, Channel::Sms) => format!("Hi {{customer_name}}! 😊 {idea} Hope to see you soon!"),
        (Tone::Friendly, Channel::Email) => {
            format!("Hello {{customer_name}}! We miss you and wanted to share: {idea}")
        }
        (Tone::Friendly, Channel::Whatsapp) => {
            format!("Hello {{customer_name}}! 🤗 {idea} Looking forward to hearing from you!")
        }
    }
}
