//! Lead intake, visibility and status progression against in-memory ports

mod support;

use std::sync::Arc;

use covera_core::{LeadFilter, LeadService};
use covera_domain::{AdminRole, CoveraError, LeadStatus};
use support::memory::{MemoryStore, RecordingNotifier};
use support::*;

fn service(store: &MemoryStore, notifier: &RecordingNotifier) -> LeadService {
    LeadService::new(
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        Arc::new(notifier.clone()),
    )
}

fn three_reps() -> MemoryStore {
    MemoryStore::new().with_admins(vec![
        representative("admin-c", "C03"),
        representative("admin-a", "A01"),
        representative("admin-b", "B02"),
    ])
}

#[tokio::test(flavor = "multi_thread")]
async fn submissions_rotate_through_active_admins_by_display_code() {
    let store = three_reps();
    let notifier = RecordingNotifier::default();
    let leads = service(&store, &notifier);

    let mut assigned = Vec::new();
    for _ in 0..4 {
        let receipt = leads.submit(auto_submission(None)).await.expect("submit");
        assert_eq!(receipt.status, LeadStatus::Requested);
        assigned.push(receipt.assigned_admin_id.expect("assigned"));
    }

    assert_eq!(assigned, vec!["admin-a", "admin-b", "admin-c", "admin-a"]);
    assert_eq!(notifier.sent().len(), 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivated_admin_is_skipped() {
    let mut off = representative("admin-b", "B02");
    off.active = false;
    let store = MemoryStore::new().with_admins(vec![
        representative("admin-a", "A01"),
        off,
        representative("admin-c", "C03"),
    ]);
    let leads = service(&store, &RecordingNotifier::default());

    let first = leads.submit(auto_submission(None)).await.expect("submit");
    let second = leads.submit(auto_submission(None)).await.expect("submit");

    assert_eq!(first.assigned_admin_id.as_deref(), Some("admin-a"));
    assert_eq!(second.assigned_admin_id.as_deref(), Some("admin-c"));
}

#[tokio::test(flavor = "multi_thread")]
async fn lead_without_admins_is_stored_unassigned() {
    let store = MemoryStore::new();
    let leads = service(&store, &RecordingNotifier::default());

    let receipt = leads.submit(auto_submission(None)).await.expect("submit");

    assert!(receipt.assigned_admin_id.is_none());
    assert!(store.lead(&receipt.lead_id).is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn notification_failure_does_not_fail_submission() {
    let store = three_reps();
    let notifier = RecordingNotifier::failing();
    let leads = service(&store, &notifier);

    let receipt = leads.submit(auto_submission(None)).await;

    assert!(receipt.is_ok());
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_contact_is_rejected_before_storage() {
    let store = three_reps();
    let leads = service(&store, &RecordingNotifier::default());
    let mut submission = auto_submission(None);
    submission.contact.phone = "call me".to_string();

    let err = leads.submit(submission).await.expect_err("invalid phone");

    assert!(matches!(err, CoveraError::InvalidInput(_)));
    let all = leads.list_for_viewer("admin-a", LeadFilter::default()).await.expect("list");
    assert!(all.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_affiliate_code_is_rejected() {
    let store = three_reps().with_partner(partner("partner-1", "METRO-01"));
    let leads = service(&store, &RecordingNotifier::default());

    let err = leads.submit(auto_submission(Some("BUSAN-99"))).await.expect_err("unknown code");
    assert!(matches!(err, CoveraError::InvalidInput(_)));

    let ok = leads.submit(auto_submission(Some("METRO-01"))).await.expect("known code");
    let stored = store.lead(&ok.lead_id).expect("stored");
    assert_eq!(stored.affiliate_code.as_deref(), Some("METRO-01"));
}

#[tokio::test(flavor = "multi_thread")]
async fn representatives_only_see_their_own_leads() {
    let store = MemoryStore::new()
        .with_admins(vec![
            representative("admin-a", "A01"),
            representative("admin-b", "B02"),
            admin("manager", "M01", AdminRole::AgencyAdmin),
        ])
        .with_lead(lead("lead-1", auto_details(), LeadStatus::Requested, None, Some("admin-a"), 30))
        .with_lead(lead("lead-2", travel_details(), LeadStatus::Offered, None, Some("admin-b"), 20))
        .with_lead(lead("lead-3", auto_details(), LeadStatus::Requested, None, Some("admin-a"), 10));
    let leads = service(&store, &RecordingNotifier::default());

    // A representative asking for someone else's leads still gets only their own.
    let filter = LeadFilter { assigned_admin_id: Some("admin-b".into()), ..LeadFilter::default() };
    let own = leads.list_for_viewer("admin-a", filter).await.expect("list");
    let ids: Vec<_> = own.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(ids, vec!["lead-3", "lead-1"]);

    let everything = leads.list_for_viewer("manager", LeadFilter::default()).await.expect("list");
    assert_eq!(everything.len(), 3);

    let err = leads.get_for_viewer("admin-a", "lead-2").await.expect_err("not visible");
    assert!(matches!(err, CoveraError::Forbidden(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_or_inactive_viewer_is_refused() {
    let mut off = representative("admin-b", "B02");
    off.active = false;
    let store = MemoryStore::new().with_admins(vec![off]);
    let leads = service(&store, &RecordingNotifier::default());

    let unknown = leads.list_for_viewer("ghost", LeadFilter::default()).await.expect_err("unknown");
    assert!(matches!(unknown, CoveraError::Auth(_)));
    let inactive =
        leads.list_for_viewer("admin-b", LeadFilter::default()).await.expect_err("inactive");
    assert!(matches!(inactive, CoveraError::Forbidden(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn status_moves_forward_one_step_at_a_time() {
    let store = three_reps().with_lead(lead(
        "lead-1",
        auto_details(),
        LeadStatus::Requested,
        None,
        Some("admin-a"),
        1,
    ));
    let leads = service(&store, &RecordingNotifier::default());

    let offered =
        leads.advance_status("admin-a", "lead-1", LeadStatus::Offered).await.expect("advance");
    assert_eq!(offered.status, LeadStatus::Offered);

    let skip = leads
        .advance_status("admin-a", "lead-1", LeadStatus::Converted)
        .await
        .expect_err("skip");
    assert!(matches!(skip, CoveraError::InvalidInput(_)));

    let other = leads
        .advance_status("admin-b", "lead-1", LeadStatus::PaymentInProgress)
        .await
        .expect_err("not assignee");
    assert!(matches!(other, CoveraError::Forbidden(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn reassignment_requires_manager_and_active_target() {
    let mut off = representative("admin-c", "C03");
    off.active = false;
    let store = MemoryStore::new()
        .with_admins(vec![
            representative("admin-a", "A01"),
            representative("admin-b", "B02"),
            off,
            admin("manager", "M01", AdminRole::AgencyAdmin),
        ])
        .with_lead(lead("lead-1", auto_details(), LeadStatus::Requested, None, Some("admin-a"), 1));
    let leads = service(&store, &RecordingNotifier::default());

    let denied = leads.reassign("admin-a", "lead-1", "admin-b").await.expect_err("rep");
    assert!(matches!(denied, CoveraError::Forbidden(_)));

    let inactive = leads.reassign("manager", "lead-1", "admin-c").await.expect_err("inactive");
    assert!(matches!(inactive, CoveraError::InvalidInput(_)));

    let missing = leads.reassign("manager", "lead-1", "nobody").await.expect_err("missing");
    assert!(matches!(missing, CoveraError::NotFound(_)));

    let moved = leads.reassign("manager", "lead-1", "admin-b").await.expect("reassign");
    assert_eq!(moved.assigned_admin_id.as_deref(), Some("admin-b"));
}
