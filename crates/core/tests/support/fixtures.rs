//! Builders for admins, partners, leads and submissions

use chrono::{Duration, NaiveDate, Utc};
use covera_domain::{
    Admin, AdminRole, AutoDetails, Availability, ContactInfo, Lead, LeadDetails, LeadStatus,
    LeadSubmission, Partner, TravelDetails,
};

pub fn admin(id: &str, display_code: &str, role: AdminRole) -> Admin {
    Admin {
        id: id.to_string(),
        display_code: display_code.to_string(),
        name: format!("Admin {display_code}"),
        email: format!("{}@covera.example", display_code.to_lowercase()),
        role,
        availability: Availability::Active,
        active: true,
        created_at: Utc::now(),
    }
}

pub fn representative(id: &str, display_code: &str) -> Admin {
    admin(id, display_code, AdminRole::Representative)
}

pub fn partner(id: &str, code: &str) -> Partner {
    Partner {
        id: id.to_string(),
        affiliate_code: code.to_string(),
        name: format!("Partner {code}"),
        email: format!("{}@partners.example", code.to_lowercase()),
        wallet_balance: 0.0,
        created_at: Utc::now(),
    }
}

pub fn contact() -> ContactInfo {
    ContactInfo {
        name: "Avery Quinn".to_string(),
        phone: "555-234-5678".to_string(),
        email: Some("jiwoo@example.com".to_string()),
    }
}

pub fn auto_details() -> LeadDetails {
    LeadDetails::Auto(AutoDetails {
        vehicle_model: "Camry".to_string(),
        vehicle_year: 2022,
        driver_age: 31,
    })
}

pub fn travel_details() -> LeadDetails {
    LeadDetails::Travel(TravelDetails {
        destination: "Da Nang".to_string(),
        departure_date: NaiveDate::from_ymd_opt(2026, 12, 20).expect("date"),
        return_date: NaiveDate::from_ymd_opt(2026, 12, 27).expect("date"),
        travelers: 3,
    })
}

pub fn auto_submission(affiliate_code: Option<&str>) -> LeadSubmission {
    LeadSubmission {
        contact: contact(),
        affiliate_code: affiliate_code.map(str::to_string),
        details: auto_details(),
    }
}

/// A stored lead, `age_minutes` old, in the given status
pub fn lead(
    id: &str,
    details: LeadDetails,
    status: LeadStatus,
    affiliate_code: Option<&str>,
    assigned_admin_id: Option<&str>,
    age_minutes: i64,
) -> Lead {
    let created_at = Utc::now() - Duration::minutes(age_minutes);
    Lead {
        id: id.to_string(),
        product_type: details.product_type(),
        details,
        status,
        contact: contact(),
        affiliate_code: affiliate_code.map(str::to_string),
        assigned_admin_id: assigned_admin_id.map(str::to_string),
        commission: None,
        total_premium: None,
        created_at,
        updated_at: created_at,
    }
}

pub fn converted_auto_lead(id: &str, affiliate_code: Option<&str>) -> Lead {
    lead(id, auto_details(), LeadStatus::Converted, affiliate_code, Some("admin-a"), 5)
}

