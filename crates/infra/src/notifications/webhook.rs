//! Mail relay webhook notifier
//!
//! Posts an email-shaped JSON payload to the relay. Delivery is the relay's
//! job; any non-2xx answer is reported as an error to the caller.

use async_trait::async_trait;
use covera_core::{LeadNotification, LeadNotifier};
use covera_domain::{CoveraError, Result};
use serde::Serialize;
use tracing::debug;

use crate::http::HttpClient;

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    to: &'a str,
    subject: String,
    text: String,
    lead: &'a LeadNotification,
}

/// Hands new-lead notifications to an HTTP mail relay
pub struct WebhookNotifier {
    client: HttpClient,
    url: String,
    recipient: String,
}

impl WebhookNotifier {
    pub fn new(client: HttpClient, url: impl Into<String>, recipient: impl Into<String>) -> Self {
        Self { client, url: url.into(), recipient: recipient.into() }
    }
}

fn render(notification: &LeadNotification) -> (String, String) {
    let subject = format!("[Covera] New {} lead from {}", notification.product_type, notification.customer_name);
    let text = format!(
        "Product: {}\nCustomer: {}\nPhone: {}\nPartner: {}\nAssigned to: {}\nSubmitted: {}",
        notification.product_type,
        notification.customer_name,
        notification.customer_phone,
        notification.affiliate_code.as_deref().unwrap_or("direct"),
        notification.assigned_admin_id.as_deref().unwrap_or("unassigned"),
        notification.submitted_at.to_rfc3339(),
    );
    (subject, text)
}

#[async_trait]
impl LeadNotifier for WebhookNotifier {
    async fn notify_new_lead(&self, notification: &LeadNotification) -> Result<()> {
        let (subject, text) = render(notification);
        let payload = EmailPayload { to: &self.recipient, subject, text, lead: notification };

        let response =
            self.client.send(self.client.inner().post(&self.url).json(&payload)).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CoveraError::Network(format!("mail relay answered HTTP {status}")));
        }

        debug!(lead_id = %notification.lead_id, %status, "lead notification delivered");
        Ok(())
    }
}
