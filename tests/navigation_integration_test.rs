//! Guarded navigation, menus, return URLs and session expiry as seen
//! through a fully wired context

mod common;

use cabinet::adapters::storage::KeyValueStore;
use cabinet::config::secret_string;
use cabinet::core::navigation::NavigationOutcome;
use cabinet::core::session::SessionState;
use cabinet::domain::Credentials;
use common::{auth_body, config, context, context_with, seed_session, wait_for_location};
use std::time::Duration;

fn labels(context: &cabinet::core::AppContext) -> Vec<&'static str> {
    context.navigator().menu().iter().map(|item| item.label).collect()
}

#[tokio::test]
async fn test_anonymous_navigation_redirects_to_login_with_return_url() {
    let (context, _store) = context("http://127.0.0.1:9");

    let outcome = context.navigator().navigate("/patients/4");

    assert_eq!(
        outcome,
        NavigationOutcome::Redirected {
            requested: "/patients/4".to_string(),
            location: "/auth/login?returnUrl=%2Fpatients%2F4".to_string(),
        }
    );
    assert_eq!(context.navigator().return_url().as_deref(), Some("/patients/4"));
    assert!(context.navigator().menu().is_empty());
}

#[tokio::test]
async fn test_public_pages_need_no_session() {
    let (context, _store) = context("http://127.0.0.1:9");

    let outcome = context.navigator().navigate("/auth/register");

    assert_eq!(outcome, NavigationOutcome::Arrived("/auth/register".to_string()));
}

#[tokio::test]
async fn test_login_returns_to_the_requested_page() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(200)
        .with_body(auth_body("t-1", "r-1", "SECRETAIRE"))
        .create_async()
        .await;
    let (context, _store) = context(&server.url());

    context.navigator().navigate("/appointments?day=today");
    context
        .sessions()
        .login(&Credentials::new(
            "staff@x.com",
            secret_string("secret123".to_string()),
        ))
        .await
        .unwrap();
    let landing = context.navigator().after_login();

    assert_eq!(
        landing,
        NavigationOutcome::Arrived("/appointments?day=today".to_string())
    );
    // consumed
    assert!(context.navigator().return_url().is_none());
}

#[tokio::test]
async fn test_restored_secretary_cannot_open_user_management() {
    let (context, store) = context("http://127.0.0.1:9");
    seed_session(&store, "t-seed", "SECRETAIRE");

    let (restored, listener) = context.start().unwrap();
    assert!(restored);
    assert_eq!(context.navigator().current_location(), "/dashboard");

    let outcome = context.navigator().navigate("/users");
    assert_eq!(outcome.location(), "/dashboard");
    assert!(matches!(outcome, NavigationOutcome::Redirected { .. }));

    let menu = labels(&context);
    assert!(menu.contains(&"Patients"));
    assert!(!menu.contains(&"Users"));
    listener.abort();
}

#[tokio::test]
async fn test_admin_sees_user_management() {
    let (context, store) = context("http://127.0.0.1:9");
    seed_session(&store, "t-seed", "ADMIN");
    let (_, listener) = context.start().unwrap();

    assert_eq!(
        context.navigator().navigate("/users/7"),
        NavigationOutcome::Arrived("/users/7".to_string())
    );
    assert!(labels(&context).contains(&"Users"));
    listener.abort();
}

#[tokio::test]
async fn test_unknown_path_falls_back() {
    let (context, store) = context("http://127.0.0.1:9");
    seed_session(&store, "t-seed", "MEDECIN");
    let (_, listener) = context.start().unwrap();

    let outcome = context.navigator().navigate("/no-such-screen");

    assert_eq!(outcome.location(), "/dashboard");
    listener.abort();
}

#[tokio::test]
async fn test_corrupt_stored_user_is_discarded() {
    let (context, store) = context("http://127.0.0.1:9");
    store.set("auth_token", "t-seed").unwrap();
    store.set("current_user", "{broken").unwrap();

    let (restored, listener) = context.start().unwrap();

    assert!(!restored);
    assert!(store.keys().unwrap().is_empty());
    assert_eq!(context.sessions().state(), SessionState::Anonymous);
    listener.abort();
}

#[tokio::test(start_paused = true)]
async fn test_session_expires_after_timeout_regardless_of_activity() {
    let mut config = config("http://127.0.0.1:9");
    config.session.timeout_seconds = 60;
    let (context, store) = context_with(config);
    seed_session(&store, "t-seed", "MEDECIN");
    let (_, listener) = context.start().unwrap();

    tokio::time::sleep(Duration::from_secs(30)).await;
    // navigation is activity, it must not push the deadline back
    context.navigator().navigate("/patients");
    assert!(context.sessions().is_authenticated());

    tokio::time::sleep(Duration::from_secs(31)).await;

    assert!(!context.sessions().is_authenticated());
    assert!(store.keys().unwrap().is_empty());
    wait_for_location(context.navigator(), "/auth/login").await;
    listener.abort();
}
