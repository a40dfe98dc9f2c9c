use anyhow::Context;
use async_trait::async_trait;

use crate::models::{BookingRecord, LeadRecord};

/// Where captured leads and scheduled demos end up. The widget itself never
/// talks to a CRM; it hands records to whatever sink is configured.
#[async_trait]
pub trait CrmSink: Send + Sync {
    async fn record_lead(&self, lead: &LeadRecord) -> anyhow::Result<()>;
    async fn record_booking(&self, booking: &BookingRecord) -> anyhow::Result<()>;
}

/// Default sink: structured log lines, nothing leaves the process.
pub struct LogCrmSink;

#[async_trait]
impl CrmSink for LogCrmSink {
    async fn record_lead(&self, lead: &LeadRecord) -> anyhow::Result<()> {
        tracing::info!(
            session = %lead.session_id,
            name = %lead.name,
            email = %lead.email,
            "lead captured"
        );
        Ok(())
    }

    async fn record_booking(&self, booking: &BookingRecord) -> anyhow::Result<()> {
        tracing::info!(
            session = %booking.session_id,
            date = %booking.date,
            time = %booking.time,
            timezone = %booking.timezone,
            "demo booked"
        );
        Ok(())
    }
}

/// Forwards records as JSON to an external webhook (Zapier, a real CRM, …).
pub struct WebhookCrmSink {
    url: String,
    client: reqwest::Client,
}

impl WebhookCrmSink {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, kind: &str, payload: serde_json::Value) -> anyhow::Result<()> {
        self.client
            .post(&self.url)
            .json(&serde_json::json!({ "kind": kind, "record": payload }))
            .send()
            .await
            .context("failed to reach CRM webhook")?
            .error_for_status()
            .context("CRM webhook returned error")?;
        Ok(())
    }
}

#[async_trait]
impl CrmSink for WebhookCrmSink {
    async fn record_lead(&self, lead: &LeadRecord) -> anyhow::Result<()> {
        self.post("lead", serde_json::to_value(lead)?).await
    }

    async fn record_booking(&self, booking: &BookingRecord) -> anyhow::Result<()> {
        self.post("booking", serde_json::to_value(booking)?).await
    }
}
