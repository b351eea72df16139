//! Tests for the complaint repository's reconciliation semantics.

use std::sync::Arc;

use mockall::predicate::eq;

use super::*;
use crate::domain::authorization::ListScope;
use crate::domain::complaint::{ComplaintStatus, CreatorRef};
use crate::domain::ports::MockComplaintsApi;
use crate::domain::session::{AuthToken, AuthenticatedUser};
use crate::domain::user::{Role, UserIdentity};

fn session_for(role: Role) -> Session {
    Session::Authenticated(AuthenticatedUser {
        token: AuthToken::new("tok-1").expect("token is non-empty"),
        user: UserIdentity {
            id: "acct-1".to_owned(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            role,
        },
    })
}

fn record(id: &str, title: &str) -> ComplaintRecord {
    ComplaintRecord {
        id: ComplaintId::new(id),
        title: title.to_owned(),
        description: "details".to_owned(),
        amount_disputed: Some(120.5),
        target_company: "Acme".to_owned(),
        target_company_email: "billing@acme.test".to_owned(),
        status: ComplaintStatus::Pending,
        created_by: Some(
            CreatorRef::try_new("acct-1", Some("Ada".to_owned()), None, None)
                .expect("creator has a label"),
        ),
    }
}

fn payload() -> ComplaintPayload {
    ComplaintPayload {
        title: "Bad charge".to_owned(),
        description: "Charged twice".to_owned(),
        amount_disputed: Some(42.0),
        target_company: "Acme".to_owned(),
        target_company_email: "billing@acme.test".to_owned(),
        status: ComplaintStatus::Pending,
    }
}

#[tokio::test]
async fn load_without_a_session_issues_no_request() {
    let mut api = MockComplaintsApi::new();
    api.expect_list().times(0);

    let mut repo = ComplaintRepository::new(Arc::new(api));
    repo.load(&Session::Anonymous).await.expect("no-op load");
    assert!(repo.complaints().is_empty());
    assert!(repo.last_error().is_none());
}

#[tokio::test]
async fn admin_load_queries_the_all_records_scope() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .with(mockall::predicate::always(), eq(ListScope::AllRecords))
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-2", "Newest"), record("r-1", "Older")]));

    let mut repo = ComplaintRepository::new(Arc::new(api));
    repo.load(&session_for(Role::Admin)).await.expect("load succeeds");
    assert_eq!(repo.complaints().len(), 2);
    assert!(!repo.is_loading());
}

#[tokio::test]
async fn supplier_load_queries_the_my_submissions_scope() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .with(mockall::predicate::always(), eq(ListScope::MySubmissions))
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-1", "Mine")]));

    let mut repo = ComplaintRepository::new(Arc::new(api));
    repo.load(&session_for(Role::Supplier))
        .await
        .expect("load succeeds");
    assert_eq!(repo.complaints().len(), 1);
}

#[tokio::test]
async fn failed_load_preserves_the_prior_collection() {
    let mut api = MockComplaintsApi::new();
    let mut call = 0_u32;
    api.expect_list().times(2).returning(move |_, _| {
        call += 1;
        if call == 1 {
            Ok(vec![record("r-1", "Kept")])
        } else {
            Err(ComplaintsApiError::api("Server fell over"))
        }
    });

    let mut repo = ComplaintRepository::new(Arc::new(api));
    let session = session_for(Role::User);
    repo.load(&session).await.expect("first load succeeds");

    let error = repo.load(&session).await.expect_err("second load fails");
    assert_eq!(error.message(), "Server fell over");
    assert_eq!(repo.complaints().len(), 1, "prior records stay visible");
    assert_eq!(repo.last_error(), Some("Server fell over"));
    assert!(!repo.is_loading());
}

#[tokio::test]
async fn failed_load_without_a_parsable_message_uses_the_fallback() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .times(1)
        .return_once(|_, _| Err(ComplaintsApiError::transport("connection reset")));

    let mut repo = ComplaintRepository::new(Arc::new(api));
    let error = repo
        .load(&session_for(Role::User))
        .await
        .expect_err("load fails");
    assert_eq!(error.message(), "Failed to load complaints");
}

#[tokio::test]
async fn create_success_prepends_the_canonical_record() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-1", "Existing")]));
    api.expect_create()
        .times(1)
        .return_once(|_, _| Ok(record("99", "Bad charge")));

    let mut repo = ComplaintRepository::new(Arc::new(api));
    let session = session_for(Role::Supplier);
    repo.load(&session).await.expect("load succeeds");

    let created = repo
        .create(&session, &payload())
        .await
        .expect("create succeeds");
    assert_eq!(created.id, ComplaintId::new("99"));
    let first = repo.complaints().first().expect("cache is non-empty");
    assert_eq!(first.id, ComplaintId::new("99"));
    assert_eq!(repo.complaints().len(), 2);
}

#[tokio::test]
async fn create_failure_leaves_the_collection_identical() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-1", "Existing")]));
    api.expect_create()
        .times(1)
        .return_once(|_, _| Err(ComplaintsApiError::forbidden("Suppliers only")));

    let mut repo = ComplaintRepository::new(Arc::new(api));
    let session = session_for(Role::User);
    repo.load(&session).await.expect("load succeeds");
    let before = repo.complaints().to_vec();

    let error = repo
        .create(&session, &payload())
        .await
        .expect_err("create fails");
    assert_eq!(error.message(), "Suppliers only");
    assert_eq!(repo.complaints(), before.as_slice(), "no phantom record");
}

#[tokio::test]
async fn update_success_replaces_exactly_one_record_in_place() {
    let mut updated = record("r-2", "Renamed");
    updated.status = ComplaintStatus::Resolved;
    let response = updated.clone();

    let mut api = MockComplaintsApi::new();
    api.expect_list().times(1).return_once(|_, _| {
        Ok(vec![
            record("r-3", "Newest"),
            record("r-2", "Middle"),
            record("r-1", "Oldest"),
        ])
    });
    api.expect_update()
        .withf(|_, id, _| id == &ComplaintId::new("r-2"))
        .times(1)
        .return_once(move |_, _, _| Ok(response));

    let mut repo = ComplaintRepository::new(Arc::new(api));
    let session = session_for(Role::Admin);
    repo.load(&session).await.expect("load succeeds");

    repo.update(&session, &ComplaintId::new("r-2"), &payload())
        .await
        .expect("update succeeds");

    let ids: Vec<&str> = repo
        .complaints()
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, ["r-3", "r-2", "r-1"], "ordering is preserved");
    assert_eq!(repo.find(&ComplaintId::new("r-2")), Some(&updated));
    assert_eq!(
        repo.find(&ComplaintId::new("r-3")).map(|r| r.title.as_str()),
        Some("Newest"),
        "other records are unchanged"
    );
}

#[tokio::test]
async fn update_failure_leaves_the_collection_unchanged() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-1", "Original")]));
    api.expect_update()
        .times(1)
        .return_once(|_, _, _| Err(ComplaintsApiError::api("Validation failed")));

    let mut repo = ComplaintRepository::new(Arc::new(api));
    let session = session_for(Role::Admin);
    repo.load(&session).await.expect("load succeeds");
    let before = repo.complaints().to_vec();

    let error = repo
        .update(&session, &ComplaintId::new("r-1"), &payload())
        .await
        .expect_err("update fails");
    assert_eq!(error.message(), "Validation failed");
    assert_eq!(repo.complaints(), before.as_slice());
}

#[tokio::test]
async fn delete_without_confirmation_issues_no_call() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-1", "Kept")]));
    api.expect_delete().times(0);

    let mut repo = ComplaintRepository::new(Arc::new(api));
    let session = session_for(Role::Admin);
    repo.load(&session).await.expect("load succeeds");

    let outcome = repo
        .delete(
            &session,
            &ComplaintId::new("r-1"),
            DeleteConfirmation::Dismissed,
        )
        .await
        .expect("dismissal is not an error");
    assert_eq!(outcome, DeleteOutcome::Cancelled);
    assert_eq!(repo.complaints().len(), 1);
}

#[tokio::test]
async fn confirmed_delete_removes_the_matching_record() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-2", "Doomed"), record("r-1", "Kept")]));
    api.expect_delete()
        .withf(|_, id| id == &ComplaintId::new("r-2"))
        .times(1)
        .return_once(|_, _| Ok(()));

    let mut repo = ComplaintRepository::new(Arc::new(api));
    let session = session_for(Role::Admin);
    repo.load(&session).await.expect("load succeeds");

    let outcome = repo
        .delete(
            &session,
            &ComplaintId::new("r-2"),
            DeleteConfirmation::Confirmed,
        )
        .await
        .expect("delete succeeds");
    assert_eq!(outcome, DeleteOutcome::Deleted);
    let ids: Vec<&str> = repo
        .complaints()
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(ids, ["r-1"]);
}

#[tokio::test]
async fn mutations_without_a_session_are_rejected_locally() {
    let mut api = MockComplaintsApi::new();
    api.expect_create().times(0);

    let mut repo = ComplaintRepository::new(Arc::new(api));
    let error = repo
        .create(&Session::Anonymous, &payload())
        .await
        .expect_err("no credential to present");
    assert_eq!(error.message(), "Not signed in");
}

#[tokio::test]
async fn authorization_failures_surface_without_session_teardown() {
    let mut api = MockComplaintsApi::new();
    api.expect_delete()
        .times(1)
        .return_once(|_, _| Err(ComplaintsApiError::forbidden("Admins only")));

    let mut repo = ComplaintRepository::new(Arc::new(api));
    let session = session_for(Role::Supplier);
    let error = repo
        .delete(
            &session,
            &ComplaintId::new("r-1"),
            DeleteConfirmation::Confirmed,
        )
        .await
        .expect_err("server refuses");
    assert_eq!(error.message(), "Admins only");
    // The session itself is untouched; invalidation is the caller's policy.
    assert!(session.is_authenticated());
}
