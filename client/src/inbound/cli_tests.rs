//! Tests for subcommand execution and policy-driven rendering.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{InMemorySessionStorage, MockComplaintsApi};
use crate::domain::{
    AuthToken, AuthenticatedUser, ComplaintRecord, ComplaintStatus, CreatorRef, SessionStore,
    UserIdentity,
};

fn identity(role: Role) -> UserIdentity {
    UserIdentity {
        id: "acct-1".to_owned(),
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        role,
    }
}

fn record(id: &str, creator_id: &str) -> ComplaintRecord {
    ComplaintRecord {
        id: ComplaintId::new(id),
        title: "Short delivery".to_owned(),
        description: "Two pallets missing".to_owned(),
        amount_disputed: Some(310.0),
        target_company: "Acme".to_owned(),
        target_company_email: "billing@acme.test".to_owned(),
        status: ComplaintStatus::Pending,
        created_by: Some(
            CreatorRef::try_new(creator_id, Some("Grace".to_owned()), None, None)
                .expect("creator has a label"),
        ),
    }
}

struct Fixture {
    account: AccountService<MockComplaintsApi, InMemorySessionStorage>,
    repository: ComplaintRepository<MockComplaintsApi>,
}

fn fixture(api: MockComplaintsApi, signed_in_as: Option<Role>) -> Fixture {
    let api = Arc::new(api);
    let sessions = SessionStore::new(Arc::new(InMemorySessionStorage::default()));
    if let Some(role) = signed_in_as {
        let auth = AuthenticatedUser {
            token: AuthToken::new("tok-1").expect("token is non-empty"),
            user: identity(role),
        };
        sessions.login(&auth).expect("session persists");
    }
    Fixture {
        account: AccountService::new(Arc::clone(&api), sessions),
        repository: ComplaintRepository::new(api),
    }
}

#[tokio::test]
async fn login_persists_the_session_and_greets() {
    let mut api = MockComplaintsApi::new();
    api.expect_login().times(1).return_once(|_| {
        Ok(AuthenticatedUser {
            token: AuthToken::new("tok-9").expect("token is non-empty"),
            user: identity(Role::Supplier),
        })
    });
    let mut fx = fixture(api, None);

    let lines = run(
        Command::Login {
            email: "ada@example.com".to_owned(),
            password: "secret1".to_owned(),
        },
        &fx.account,
        &mut fx.repository,
    )
    .await
    .expect("login succeeds");

    assert_eq!(lines, ["Signed in as Ada <ada@example.com> (supplier)"]);
    assert!(fx.account.restore().is_authenticated());
}

#[tokio::test]
async fn short_passwords_never_reach_the_network() {
    let mut api = MockComplaintsApi::new();
    api.expect_signup().times(0);
    let mut fx = fixture(api, None);

    let error = run(
        Command::Register {
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            role: RoleArg::Supplier,
            password: "abc12".to_owned(),
            confirm_password: "abc12".to_owned(),
        },
        &fx.account,
        &mut fx.repository,
    )
    .await
    .expect_err("validation rejects locally");

    assert_eq!(
        error.to_string(),
        "Password must be at least 6 characters long"
    );
}

#[tokio::test]
async fn listing_requires_a_session() {
    let mut api = MockComplaintsApi::new();
    api.expect_list().times(0);
    let mut fx = fixture(api, None);

    let error = run(Command::List, &fx.account, &mut fx.repository)
        .await
        .expect_err("anonymous listing is refused");
    assert!(matches!(error, CommandError::NotSignedIn));
}

#[tokio::test]
async fn supplier_listing_hides_creator_identities() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-1", "acct-1")]));
    let mut fx = fixture(api, Some(Role::Supplier));

    let lines = run(Command::List, &fx.account, &mut fx.repository)
        .await
        .expect("listing succeeds");

    assert_eq!(lines.len(), 1, "no creator line for suppliers");
    assert!(lines[0].contains("[edit]"), "own record is editable: {lines:?}");
    assert!(!lines[0].contains("delete"));
}

#[tokio::test]
async fn admin_listing_shows_creators_and_all_actions() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-1", "acct-7")]));
    let mut fx = fixture(api, Some(Role::Admin));

    let lines = run(Command::List, &fx.account, &mut fx.repository)
        .await
        .expect("listing succeeds");

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[edit, delete]"));
    assert!(lines[1].contains("created by Grace"));
}

#[tokio::test]
async fn regular_users_cannot_raise_complaints() {
    let mut api = MockComplaintsApi::new();
    api.expect_create().times(0);
    let mut fx = fixture(api, Some(Role::User));

    let error = run(
        Command::Create {
            title: "Short delivery".to_owned(),
            description: String::new(),
            amount: None,
            target_company: "Acme".to_owned(),
            target_company_email: "billing@acme.test".to_owned(),
        },
        &fx.account,
        &mut fx.repository,
    )
    .await
    .expect_err("non-suppliers are refused");
    assert_eq!(error.to_string(), "Only suppliers raise complaints");
}

#[tokio::test]
async fn create_parses_the_amount_and_reports_the_new_id() {
    let mut api = MockComplaintsApi::new();
    api.expect_create()
        .withf(|_, payload| payload.amount_disputed == Some(99.5))
        .times(1)
        .return_once(|_, _| Ok(record("77", "acct-1")));
    let mut fx = fixture(api, Some(Role::Supplier));

    let lines = run(
        Command::Create {
            title: "Short delivery".to_owned(),
            description: "Two pallets missing".to_owned(),
            amount: Some("99.5".to_owned()),
            target_company: "Acme".to_owned(),
            target_company_email: "billing@acme.test".to_owned(),
        },
        &fx.account,
        &mut fx.repository,
    )
    .await
    .expect("create succeeds");

    assert_eq!(lines, ["Created complaint 77 (Pending)"]);
    assert_eq!(fx.repository.complaints().len(), 1);
}

#[tokio::test]
async fn unparsable_amounts_fail_before_any_request() {
    let mut api = MockComplaintsApi::new();
    api.expect_create().times(0);
    let mut fx = fixture(api, Some(Role::Supplier));

    let error = run(
        Command::Create {
            title: "Short delivery".to_owned(),
            description: String::new(),
            amount: Some("ninety".to_owned()),
            target_company: "Acme".to_owned(),
            target_company_email: "billing@acme.test".to_owned(),
        },
        &fx.account,
        &mut fx.repository,
    )
    .await
    .expect_err("draft is rejected");
    assert!(matches!(error, CommandError::Form(_)));
}

#[tokio::test]
async fn updating_anothers_record_as_supplier_is_refused() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-1", "acct-7")]));
    api.expect_update().times(0);
    let mut fx = fixture(api, Some(Role::Supplier));

    let error = run(
        Command::Update {
            id: "r-1".to_owned(),
            title: Some("Amended".to_owned()),
            description: None,
            amount: None,
            target_company: None,
            target_company_email: None,
            status: None,
        },
        &fx.account,
        &mut fx.repository,
    )
    .await
    .expect_err("policy refuses");
    assert_eq!(error.to_string(), "You may not edit this complaint");
}

#[tokio::test]
async fn suppliers_cannot_set_the_rejected_status() {
    let mut api = MockComplaintsApi::new();
    api.expect_list()
        .times(1)
        .return_once(|_, _| Ok(vec![record("r-1", "acct-1")]));
    api.expect_update().times(0);
    let mut fx = fixture(api, Some(Role::Supplier));

    let error = run(
        Command::Update {
            id: "r-1".to_owned(),
            title: None,
            description: None,
            amount: None,
            target_company: None,
            target_company_email: None,
            status: Some(StatusArg::Rejected),
        },
        &fx.account,
        &mut fx.repository,
    )
    .await
    .expect_err("status is role-gated");
    assert!(matches!(error, CommandError::Form(FormError::StatusNotPermitted)));
}

#[tokio::test]
async fn update_of_an_unknown_id_is_reported_without_a_request() {
    let mut api = MockComplaintsApi::new();
    api.expect_list().times(1).return_once(|_, _| Ok(vec![]));
    api.expect_update().times(0);
    let mut fx = fixture(api, Some(Role::Admin));

    let error = run(
        Command::Update {
            id: "r-404".to_owned(),
            title: None,
            description: None,
            amount: None,
            target_company: None,
            target_company_email: None,
            status: None,
        },
        &fx.account,
        &mut fx.repository,
    )
    .await
    .expect_err("nothing to edit");
    assert_eq!(error.to_string(), "No complaint with id r-404");
}

#[tokio::test]
async fn delete_without_the_yes_flag_does_nothing() {
    let mut api = MockComplaintsApi::new();
    api.expect_delete().times(0);
    let mut fx = fixture(api, Some(Role::Admin));

    let lines = run(
        Command::Delete {
            id: "r-1".to_owned(),
            yes: false,
        },
        &fx.account,
        &mut fx.repository,
    )
    .await
    .expect("dismissal is not an error");
    assert_eq!(lines, ["Nothing deleted; pass --yes to confirm"]);
}

#[tokio::test]
async fn logout_then_whoami_reports_anonymous() {
    let api = MockComplaintsApi::new();
    let mut fx = fixture(api, Some(Role::User));

    run(Command::Logout, &fx.account, &mut fx.repository)
        .await
        .expect("logout succeeds");
    let lines = run(Command::Whoami, &fx.account, &mut fx.repository)
        .await
        .expect("whoami never fails");
    assert_eq!(lines, ["Not signed in"]);
}
