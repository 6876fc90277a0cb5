//! Port for handing new-lead notifications to a delivery channel.
//!
//! Delivery itself (email relay, chat webhook) is an external service; the
//! lead flow treats notification as best effort.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use covera_domain::{Lead, ProductType, Result};
use serde::Serialize;

/// Summary of a newly submitted lead
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadNotification {
    pub lead_id: String,
    pub product_type: ProductType,
    pub customer_name: String,
    pub customer_phone: String,
    pub affiliate_code: Option<String>,
    pub assigned_admin_id: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Lead> for LeadNotification {
    fn from(lead: &Lead) -> Self {
        Self {
            lead_id: lead.id.clone(),
            product_type: lead.product_type,
            customer_name: lead.contact.name.clone(),
            customer_phone: lead.contact.phone.clone(),
            affiliate_code: lead.affiliate_code.clone(),
            assigned_admin_id: lead.assigned_admin_id.clone(),
            submitted_at: lead.created_at,
        }
    }
}

/// Delivery channel for new-lead notifications
#[async_trait]
pub trait LeadNotifier: Send + Sync {
    /// Deliver one notification.
    async fn notify_new_lead(&self, notification: &LeadNotification) -> Result<()>;
}
