//! End-to-end session tests: context wiring, auth endpoints, token
//! refresh through the request pipeline and navigation side effects

mod common;

use cabinet::adapters::storage::KeyValueStore;
use cabinet::config::secret_string;
use cabinet::core::session::{SessionEvent, SessionState};
use cabinet::domain::{ApiError, AuthError, CabinetError, Credentials, PatientFilter};
use common::{auth_body, context, empty_page, wait_for_location};
use mockito::Matcher;

fn credentials() -> Credentials {
    Credentials::new("staff@x.com", secret_string("secret123".to_string()))
}

async fn mock_login(server: &mut mockito::ServerGuard, token: &str) -> mockito::Mock {
    server
        .mock("POST", "/auth/login")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "email": "staff@x.com"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(auth_body(token, "r-1", "MEDECIN"))
        .create_async()
        .await
}

#[tokio::test]
async fn test_login_persists_session_and_lands_on_dashboard() {
    let mut server = mockito::Server::new_async().await;
    let login = mock_login(&mut server, "t-1").await;
    let (context, store) = context(&server.url());
    let mut events = context.sessions().events();

    let user = context.sessions().login(&credentials()).await.unwrap();

    login.assert_async().await;
    assert_eq!(user.email, "staff@x.com");
    assert_eq!(context.sessions().state(), SessionState::Authenticated);
    assert_eq!(
        store.keys().unwrap(),
        vec!["auth_token", "current_user", "refresh_token"]
    );
    assert_eq!(store.get("auth_token").unwrap().as_deref(), Some("t-1"));
    assert_eq!(store.get("refresh_token").unwrap().as_deref(), Some("r-1"));
    assert!(matches!(events.recv().await.unwrap(), SessionEvent::LoggedIn(_)));

    let landing = context.navigator().after_login();
    assert_eq!(landing.location(), "/dashboard");
}

#[tokio::test]
async fn test_invalid_credentials_leave_no_trace() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/auth/login")
        .with_status(401)
        .with_body(r#"{"message":"Bad credentials"}"#)
        .create_async()
        .await;
    let (context, store) = context(&server.url());

    let err = context.sessions().login(&credentials()).await.unwrap_err();

    assert!(matches!(err, CabinetError::Auth(AuthError::InvalidCredentials)));
    assert_eq!(err.user_message(), "Invalid credentials");
    assert_eq!(context.sessions().state(), SessionState::Anonymous);
    assert!(store.keys().unwrap().is_empty());
}

#[tokio::test]
async fn test_logout_clears_storage_and_returns_to_login() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server, "t-1").await;
    let (context, store) = context(&server.url());
    let (_, listener) = context.start().unwrap();

    context.sessions().login(&credentials()).await.unwrap();
    context.navigator().navigate("/patients");
    assert_eq!(context.navigator().current_location(), "/patients");

    context.sessions().logout();

    assert!(store.keys().unwrap().is_empty());
    assert!(context.sessions().access_token().is_none());
    wait_for_location(context.navigator(), "/auth/login").await;
    listener.abort();
}

#[tokio::test]
async fn test_unauthorized_request_is_refreshed_and_replayed() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server, "t-1").await;
    let rejected = server
        .mock("GET", "/patients")
        .match_header("authorization", "Bearer t-1")
        .with_status(401)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .match_body(Matcher::Json(serde_json::json!({ "refreshToken": "r-1" })))
        .with_status(200)
        .with_body(auth_body("t-2", "r-2", "MEDECIN"))
        .expect(1)
        .create_async()
        .await;
    let accepted = server
        .mock("GET", "/patients")
        .match_header("authorization", "Bearer t-2")
        .with_status(200)
        .with_body(empty_page())
        .create_async()
        .await;
    let (context, store) = context(&server.url());
    context.sessions().login(&credentials()).await.unwrap();

    let page = context
        .patients()
        .list(&PatientFilter::default())
        .await
        .unwrap();

    assert!(page.is_empty());
    rejected.assert_async().await;
    refresh.assert_async().await;
    accepted.assert_async().await;
    assert_eq!(store.get("auth_token").unwrap().as_deref(), Some("t-2"));
    assert_eq!(store.get("refresh_token").unwrap().as_deref(), Some("r-2"));
    assert_eq!(context.sessions().state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_concurrent_unauthorized_requests_share_one_refresh() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server, "t-1").await;
    server
        .mock("GET", "/patients")
        .match_header("authorization", "Bearer t-1")
        .with_status(401)
        .expect_at_least(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .with_status(200)
        .with_body(auth_body("t-2", "r-2", "MEDECIN"))
        .expect(1)
        .create_async()
        .await;
    server
        .mock("GET", "/patients")
        .match_header("authorization", "Bearer t-2")
        .with_status(200)
        .with_body(empty_page())
        .expect_at_least(1)
        .create_async()
        .await;
    let (context, _store) = context(&server.url());
    context.sessions().login(&credentials()).await.unwrap();

    let service = context.patients();
    let filter = PatientFilter::default();
    let results = futures::future::join_all((0..5).map(|_| service.list(&filter))).await;

    assert!(results.iter().all(Result::is_ok));
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_concurrent_requests_fail_together_when_refresh_fails() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server, "t-1").await;
    server
        .mock("GET", "/patients")
        .match_header("authorization", "Bearer t-1")
        .with_status(401)
        .expect_at_least(1)
        .create_async()
        .await;
    let refresh = server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let (context, store) = context(&server.url());
    context.sessions().login(&credentials()).await.unwrap();

    let service = context.patients();
    let filter = PatientFilter::default();
    let results = futures::future::join_all((0..5).map(|_| service.list(&filter))).await;

    assert_eq!(results.len(), 5);
    for result in results {
        assert!(matches!(
            result,
            Err(CabinetError::Api(ApiError::Unauthenticated))
        ));
    }
    refresh.assert_async().await;
    assert_eq!(context.sessions().state(), SessionState::Anonymous);
    assert!(store.keys().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_refresh_signs_out_and_redirects() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server, "t-1").await;
    server
        .mock("GET", "/patients")
        .with_status(401)
        .create_async()
        .await;
    server
        .mock("POST", "/auth/refresh")
        .with_status(401)
        .create_async()
        .await;
    let (context, store) = context(&server.url());
    let (_, listener) = context.start().unwrap();
    context.sessions().login(&credentials()).await.unwrap();
    context.navigator().navigate("/patients");

    let err = context
        .patients()
        .list(&PatientFilter::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CabinetError::Api(ApiError::Unauthenticated)));
    assert!(!context.sessions().is_authenticated());
    assert!(store.keys().unwrap().is_empty());
    wait_for_location(context.navigator(), "/auth/login").await;
    listener.abort();
}

#[tokio::test]
async fn test_forbidden_response_raises_a_notification() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server, "t-1").await;
    server
        .mock("DELETE", "/users/4")
        .with_status(403)
        .create_async()
        .await;
    let (context, _store) = context(&server.url());
    let mut toasts = context.notifications().subscribe();
    context.sessions().login(&credentials()).await.unwrap();

    let err = context
        .users()
        .delete(cabinet::domain::UserId::new(4))
        .await
        .unwrap_err();

    assert!(matches!(err, CabinetError::Api(ApiError::Forbidden)));
    let toast = toasts.recv().await.unwrap();
    assert_eq!(toast.message, "Access denied");
    // a 403 is not a session problem
    assert!(context.sessions().is_authenticated());
}
