//! `LeadNotifier` implementations

pub mod tracing_notifier;
pub mod webhook;

use std::sync::Arc;

use covera_core::LeadNotifier;
use covera_domain::{NotificationConfig, Result};
pub use tracing_notifier::TracingNotifier;
pub use webhook::WebhookNotifier;

use crate::http::HttpClient;

/// Webhook notifier when a URL is configured, otherwise log-only.
pub fn notifier_from_config(config: &NotificationConfig) -> Result<Arc<dyn LeadNotifier>> {
    match &config.webhook_url {
        Some(url) => {
            let client = HttpClient::builder().build()?;
            Ok(Arc::new(WebhookNotifier::new(client, url.clone(), config.recipient.clone())))
        }
        None => Ok(Arc::new(TracingNotifier::new(config.recipient.clone()))),
    }
}
