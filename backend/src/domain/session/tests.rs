//! Tests for login, logout, and session restore.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockCollectionStore, MockCredentialVerifier, StoreError};
use crate::domain::{ErrorCode, Role};
use crate::outbound::store::MemoryStore;
use crate::test_support::{MutableClock, TEST_SECRET, credentials, sample_user, ts, verifier};

struct Harness {
    store: Arc<MemoryStore>,
    users: UserRepository<MemoryStore>,
}

impl Harness {
    fn session(&self) -> SessionService<MemoryStore> {
        SessionService::restore(self.store.clone(), verifier()).expect("restore succeeds")
    }
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(MutableClock::new(ts("2025-06-01T09:00:00Z")));
    let users = UserRepository::open(store.clone(), clock, || {
        Ok(vec![
            sample_user("1", Role::Admin),
            sample_user("2", Role::Manager),
            sample_user("3", Role::Staff),
        ])
    })
    .expect("open users");
    Harness { store, users }
}

#[rstest]
fn fresh_store_has_no_session(harness: Harness) {
    let session = harness.session();
    assert!(!session.is_authenticated());
    assert_eq!(
        session.require_user().expect_err("logged out").code(),
        ErrorCode::Unauthorized
    );
}

#[rstest]
fn login_persists_snapshot_and_flag(harness: Harness) {
    let mut session = harness.session();
    let user = session
        .login(&credentials("manager2@stockroom.example", TEST_SECRET), &harness.users)
        .expect("valid login");
    assert_eq!(user.role(), Role::Manager);
    assert_eq!(
        harness.store.load(StoreKey::IsAuthenticated).expect("load flag"),
        Some("true".to_owned())
    );
    let snapshot = harness
        .store
        .load(StoreKey::CurrentUser)
        .expect("load snapshot")
        .expect("snapshot stored");
    assert!(snapshot.contains("manager2@stockroom.example"));
}

#[rstest]
#[case::wrong_password("admin1@stockroom.example", "not-the-secret")]
#[case::unknown_email("ghost@stockroom.example", TEST_SECRET)]
fn login_rejections_are_unauthorized(
    harness: Harness,
    #[case] email: &str,
    #[case] password: &str,
) {
    let mut session = harness.session();
    let err = session
        .login(&credentials(email, password), &harness.users)
        .expect_err("rejected login");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
    assert!(!session.is_authenticated());
    assert_eq!(harness.store.load(StoreKey::CurrentUser).expect("load"), None);
}

#[rstest]
fn restore_picks_up_previous_login(harness: Harness) {
    let mut first = harness.session();
    first
        .login(&credentials("staff3@stockroom.example", TEST_SECRET), &harness.users)
        .expect("valid login");

    let restored = harness.session();
    let user = restored.current_user().expect("session restored");
    assert_eq!(user.id().as_str(), "3");
}

#[rstest]
fn logout_clears_memory_and_store(harness: Harness) {
    let mut session = harness.session();
    session
        .login(&credentials("admin1@stockroom.example", TEST_SECRET), &harness.users)
        .expect("valid login");
    session.logout().expect("logout succeeds");

    assert!(!session.is_authenticated());
    assert_eq!(harness.store.load(StoreKey::IsAuthenticated).expect("load"), None);
    assert!(!harness.session().is_authenticated());
}

#[rstest]
#[case::flag_false(Some("false"), Some("{}"))]
#[case::flag_missing(None, Some("{}"))]
#[case::snapshot_missing(Some("true"), None)]
#[case::snapshot_garbage(Some("true"), Some("{\"id\":"))]
fn restore_ignores_incomplete_state(#[case] flag: Option<&str>, #[case] snapshot: Option<&str>) {
    let flag = flag.map(str::to_owned);
    let snapshot = snapshot.map(str::to_owned);
    let mut store = MockCollectionStore::new();
    store
        .expect_load()
        .with(eq(StoreKey::IsAuthenticated))
        .return_once(move |_| Ok(flag));
    store
        .expect_load()
        .with(eq(StoreKey::CurrentUser))
        .return_once(move |_| Ok(snapshot));

    let session = SessionService::restore(Arc::new(store), verifier()).expect("restore succeeds");
    assert!(!session.is_authenticated());
}

#[rstest]
fn restore_surfaces_store_failures() {
    let mut store = MockCollectionStore::new();
    store
        .expect_load()
        .returning(|key| Err(StoreError::read(key.as_str(), "permission denied")));
    let err = SessionService::restore(Arc::new(store), verifier())
        .err()
        .expect("read failure");
    assert_eq!(err.code(), ErrorCode::InternalError);
}

#[rstest]
#[case(Role::Admin, Capability::ManageUsers, None)]
#[case(Role::Manager, Capability::ManageUsers, Some(ErrorCode::Forbidden))]
#[case(Role::Manager, Capability::ManageCatalogue, None)]
#[case(Role::Staff, Capability::ManageCatalogue, Some(ErrorCode::Forbidden))]
#[case(Role::Staff, Capability::RecordSales, None)]
fn authorize_follows_role(
    harness: Harness,
    #[case] role: Role,
    #[case] capability: Capability,
    #[case] expected: Option<ErrorCode>,
) {
    let email = match role {
        Role::Admin => "admin1@stockroom.example",
        Role::Manager => "manager2@stockroom.example",
        Role::Staff => "staff3@stockroom.example",
    };
    let mut session = harness.session();
    session
        .login(&credentials(email, TEST_SECRET), &harness.users)
        .expect("valid login");
    let outcome = session.authorize(capability).err().map(|err| err.code());
    assert_eq!(outcome, expected);
}

#[rstest]
fn authorize_without_session_is_unauthorized(harness: Harness) {
    let err = harness
        .session()
        .authorize(Capability::RecordSales)
        .expect_err("logged out");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[rstest]
#[case::rejected(false)]
#[case::accepted(true)]
fn verifier_decides_for_known_accounts(harness: Harness, #[case] accepted: bool) {
    let mut verifier = MockCredentialVerifier::new();
    verifier
        .expect_verify()
        .withf(|attempt| attempt.email() == "staff3@stockroom.example")
        .times(1)
        .return_const(accepted);
    let mut session =
        SessionService::restore(harness.store.clone(), Arc::new(verifier)).expect("restore");

    let outcome = session.login(
        &credentials("staff3@stockroom.example", "whatever was typed"),
        &harness.users,
    );

    assert_eq!(outcome.is_ok(), accepted);
    assert_eq!(session.is_authenticated(), accepted);
    let flag = harness.store.load(StoreKey::IsAuthenticated).expect("load flag");
    assert_eq!(flag.is_some(), accepted);
    if !accepted {
        assert_eq!(outcome.expect_err("rejected").code(), ErrorCode::Unauthorized);
    }
}
