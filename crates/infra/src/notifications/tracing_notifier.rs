//! Log-only notifier for deployments without a mail relay

use async_trait::async_trait;
use covera_core::{LeadNotification, LeadNotifier};
use covera_domain::Result;
use tracing::info;

/// Writes each new-lead notification as a structured log event
pub struct TracingNotifier {
    recipient: String,
}

impl TracingNotifier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self { recipient: recipient.into() }
    }
}

#[async_trait]
impl LeadNotifier for TracingNotifier {
    async fn notify_new_lead(&self, notification: &LeadNotification) -> Result<()> {
        info!(
            recipient = %self.recipient,
            lead_id = %notification.lead_id,
            product_type = %notification.product_type,
            assigned_admin_id = ?notification.assigned_admin_id,
            affiliate_code = ?notification.affiliate_code,
            "new lead notification"
        );
        Ok(())
    }
}
