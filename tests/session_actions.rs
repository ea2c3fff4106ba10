mod common;

use std::time::Duration;

use common::mock_backend::{MockBackend, MockResponse};
use common::{controller, unreachable_config};
use drugspeak::actions::{
    Credentials, ProfileUpdate, RegisterRequest, RejectionCause, SessionController,
    LOGIN_FALLBACK_MESSAGE, UPDATE_FALLBACK_MESSAGE,
};
use drugspeak::session::{SessionState, SessionStatus, UserId, MISSING_TOKEN_MESSAGE, NO_ACTIVE_SESSION_MESSAGE};
use drugspeak::transport::{ErrorKind, NETWORK_ERROR_MESSAGE};
use serde_json::json;

const LOGIN_OK: &str = r#"{"user": {"id": 1, "username": "amy", "email": "amy@example.com"}, "token": "abc"}"#;

async fn logged_in(mock: &MockBackend) -> SessionController {
    let controller = controller(mock);
    mock.enqueue_response(MockResponse::json(LOGIN_OK)).await;
    controller
        .login(Credentials::new("amy@example.com", "secret1"))
        .await
        .unwrap();
    controller
}

async fn wait_for_requests(mock: &MockBackend, count: usize) {
    for _ in 0..200 {
        if mock.captured_requests().await.len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("mock backend never saw {} request(s)", count);
}

#[tokio::test]
async fn test_login_success_signs_in() {
    let mock = MockBackend::start().await;
    let controller = logged_in(&mock).await;

    let state = controller.store().snapshot();
    assert_eq!(state.status, SessionStatus::Succeeded);
    assert!(state.is_logged_in);
    assert_eq!(state.token.as_ref().unwrap().expose(), "abc");
    assert_eq!(state.user.as_ref().unwrap().id, UserId::Number(1));
    assert!(state.error.is_none());

    let req = mock.single_request().await;
    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/api/auth/login");
    assert_eq!(req.json(), json!({"email": "amy@example.com", "password": "secret1"}));
    assert!(req.header("authorization").is_none());
}

#[tokio::test]
async fn test_register_sends_default_gender_and_signs_in() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(
        r#"{"user": {"id": "u-7", "username": "bob"}, "token": "tok-7"}"#,
    ))
    .await;

    let controller = controller(&mock);
    let payload = controller
        .register(RegisterRequest::new("bob", "bob@example.com", "hunter22"))
        .await
        .unwrap();
    assert_eq!(payload.token.expose(), "tok-7");

    let req = mock.single_request().await;
    assert_eq!(req.path, "/api/auth/register");
    assert_eq!(
        req.json(),
        json!({
            "username": "bob",
            "email": "bob@example.com",
            "password": "hunter22",
            "gender": "unspecified"
        })
    );

    let state = controller.store().snapshot();
    assert_eq!(state.status, SessionStatus::Succeeded);
    assert!(state.is_logged_in);
    assert_eq!(state.user.unwrap().id, UserId::Text("u-7".to_string()));
}

#[tokio::test]
async fn test_register_with_missing_password_sends_nothing() {
    let mock = MockBackend::start().await;
    let controller = controller(&mock);

    let rejection = controller
        .register(RegisterRequest::new("bob", "bob@example.com", ""))
        .await
        .unwrap_err();

    assert_eq!(rejection.cause(), RejectionCause::Precondition);
    assert_eq!(rejection.message(), "Password should not be empty");
    assert!(mock.captured_requests().await.is_empty());

    let state = controller.store().snapshot();
    assert_eq!(state.status, SessionStatus::Failed);
    assert_eq!(state.error.as_deref(), Some("Password should not be empty"));
    assert!(state.user.is_none());
    assert!(!state.is_logged_in);
}

#[tokio::test]
async fn test_register_conflict_uses_server_message() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::error(409, "Email already registered"))
        .await;

    let controller = controller(&mock);
    let rejection = controller
        .register(RegisterRequest::new("bob", "bob@example.com", "hunter22"))
        .await
        .unwrap_err();

    assert_eq!(rejection.message(), "Email already registered");
    let state = controller.store().snapshot();
    assert_eq!(state.status, SessionStatus::Failed);
    assert_eq!(state.error.as_deref(), Some("Email already registered"));
    assert!(state.token.is_none());
}

#[tokio::test]
async fn test_login_unauthorized_without_message_uses_fallback() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::empty(401)).await;

    let controller = controller(&mock);
    let rejection = controller
        .login(Credentials::new("amy@example.com", "wrong-password"))
        .await
        .unwrap_err();

    assert!(rejection.is_auth());
    assert_eq!(rejection.message(), LOGIN_FALLBACK_MESSAGE);
    assert_eq!(controller.store().error().as_deref(), Some(LOGIN_FALLBACK_MESSAGE));
}

#[tokio::test]
async fn test_login_network_failure_records_network_message() {
    let controller = SessionController::new(&unreachable_config()).unwrap();

    let rejection = controller
        .login(Credentials::new("amy@example.com", "secret1"))
        .await
        .unwrap_err();

    assert_eq!(rejection.kind(), Some(ErrorKind::Network));
    assert_eq!(rejection.message(), NETWORK_ERROR_MESSAGE);
    assert_eq!(controller.store().status(), SessionStatus::Failed);
    assert_eq!(controller.store().error().as_deref(), Some(NETWORK_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_login_without_token_is_rejected() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(r#"{"user": {"id": 1}}"#)).await;

    let controller = controller(&mock);
    let rejection = controller
        .login(Credentials::new("amy@example.com", "secret1"))
        .await
        .unwrap_err();

    assert_eq!(rejection.message(), MISSING_TOKEN_MESSAGE);
    let state = controller.store().snapshot();
    assert_eq!(state.status, SessionStatus::Failed);
    assert!(!state.is_logged_in);
}

#[tokio::test]
async fn test_update_profile_replaces_user_and_keeps_token() {
    let mock = MockBackend::start().await;
    let controller = logged_in(&mock).await;
    mock.enqueue_response(MockResponse::json(
        r#"{"updatedUser": {"id": 1, "username": "amy2", "email": "amy@example.com"}}"#,
    ))
    .await;

    let updates = ProfileUpdate {
        username: Some("amy2".to_string()),
        ..ProfileUpdate::default()
    };
    let user = controller.update_profile(UserId::Number(1), updates).await.unwrap();
    assert_eq!(user.username, "amy2");

    let requests = mock.captured_requests().await;
    assert_eq!(requests.len(), 2);
    let patch = &requests[1];
    assert_eq!(patch.method, "PATCH");
    assert_eq!(patch.path, "/api/users/1");
    assert_eq!(patch.header("authorization"), Some("Bearer abc"));
    assert_eq!(patch.json(), json!({"username": "amy2"}));

    let state = controller.store().snapshot();
    assert_eq!(state.status, SessionStatus::Succeeded);
    assert_eq!(state.user.unwrap().username, "amy2");
    assert_eq!(state.token.unwrap().expose(), "abc");
    assert!(state.is_logged_in);
}

#[tokio::test]
async fn test_update_profile_failure_keeps_session() {
    let mock = MockBackend::start().await;
    let controller = logged_in(&mock).await;
    mock.enqueue_response(MockResponse::empty(500)).await;

    let updates = ProfileUpdate {
        gender: Some("female".to_string()),
        ..ProfileUpdate::default()
    };
    let rejection = controller
        .update_profile(UserId::Number(1), updates)
        .await
        .unwrap_err();

    assert_eq!(rejection.message(), UPDATE_FALLBACK_MESSAGE);
    let state = controller.store().snapshot();
    assert_eq!(state.status, SessionStatus::Failed);
    assert_eq!(state.user.unwrap().username, "amy");
    assert_eq!(state.token.unwrap().expose(), "abc");
    assert!(state.is_logged_in);
}

#[tokio::test]
async fn test_update_profile_requires_session() {
    let mock = MockBackend::start().await;
    let controller = controller(&mock);

    let rejection = controller
        .update_profile(UserId::Number(1), ProfileUpdate::default())
        .await
        .unwrap_err();

    assert_eq!(rejection.cause(), RejectionCause::Precondition);
    assert_eq!(rejection.message(), NO_ACTIVE_SESSION_MESSAGE);
    assert!(mock.captured_requests().await.is_empty());
}

#[tokio::test]
async fn test_newer_login_supersedes_older() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(
        MockResponse::json(r#"{"user": {"id": 1}, "token": "first"}"#).with_delay(400),
    )
    .await;
    mock.enqueue_response(MockResponse::json(r#"{"user": {"id": 2}, "token": "second"}"#))
        .await;

    let controller = controller(&mock);
    let slow = tokio::spawn({
        let controller = controller.clone();
        async move {
            controller
                .login(Credentials::new("first@example.com", "secret1"))
                .await
        }
    });
    wait_for_requests(&mock, 1).await;

    controller
        .login(Credentials::new("second@example.com", "secret1"))
        .await
        .unwrap();

    let stale = slow.await.unwrap().unwrap_err();
    assert_eq!(stale.cause(), RejectionCause::Superseded);

    let state = controller.store().snapshot();
    assert_eq!(state.token.unwrap().expose(), "second");
    assert_eq!(state.user.unwrap().id, UserId::Number(2));
}

#[tokio::test]
async fn test_superseded_login_failure_is_not_recorded() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::error(500, "boom").with_delay(400))
        .await;
    mock.enqueue_response(MockResponse::json(LOGIN_OK)).await;

    let controller = controller(&mock);
    let slow = tokio::spawn({
        let controller = controller.clone();
        async move {
            controller
                .login(Credentials::new("first@example.com", "secret1"))
                .await
        }
    });
    wait_for_requests(&mock, 1).await;

    controller
        .login(Credentials::new("amy@example.com", "secret1"))
        .await
        .unwrap();

    let stale = slow.await.unwrap().unwrap_err();
    assert_eq!(stale.cause(), RejectionCause::Superseded);

    let state = controller.store().snapshot();
    assert_eq!(state.status, SessionStatus::Succeeded);
    assert!(state.error.is_none());
    assert_eq!(state.token.unwrap().expose(), "abc");
}

#[tokio::test]
async fn test_logout_discards_in_flight_login() {
    let mock = MockBackend::start().await;
    mock.enqueue_response(MockResponse::json(LOGIN_OK).with_delay(300))
        .await;

    let controller = controller(&mock);
    let pending = tokio::spawn({
        let controller = controller.clone();
        async move {
            controller
                .login(Credentials::new("amy@example.com", "secret1"))
                .await
        }
    });
    wait_for_requests(&mock, 1).await;
    assert_eq!(controller.store().status(), SessionStatus::Loading);

    controller.logout();
    let outcome = pending.await.unwrap();

    assert_eq!(outcome.unwrap_err().cause(), RejectionCause::Superseded);
    assert_eq!(controller.store().snapshot(), SessionState::default());
}

#[tokio::test]
async fn test_subscriber_sees_final_state() {
    let mock = MockBackend::start().await;
    let controller = controller(&mock);
    let mut rx = controller.store().subscribe();

    mock.enqueue_response(MockResponse::json(LOGIN_OK)).await;
    controller
        .login(Credentials::new("amy@example.com", "secret1"))
        .await
        .unwrap();

    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.status, SessionStatus::Succeeded);
    assert!(seen.is_logged_in);
}

#[tokio::test]
async fn test_verify_sends_session_token() {
    let mock = MockBackend::start().await;
    let controller = logged_in(&mock).await;
    mock.enqueue_response(MockResponse::json(r#"{"valid": true}"#)).await;

    let validity = controller.verify().await.unwrap();
    assert!(validity.valid);

    let requests = mock.captured_requests().await;
    let verify = &requests[1];
    assert_eq!(verify.method, "GET");
    assert_eq!(verify.path, "/api/auth/verify");
    assert_eq!(verify.header("authorization"), Some("Bearer abc"));
    assert_eq!(controller.store().status(), SessionStatus::Succeeded);
}

#[tokio::test]
async fn test_clear_error_after_failure() {
    let mock = MockBackend::start().await;
    let controller = controller(&mock);

    controller
        .login(Credentials::new("", ""))
        .await
        .unwrap_err();
    assert!(controller.store().error().is_some());

    controller.clear_error();
    let state = controller.store().snapshot();
    assert!(state.error.is_none());
    assert_eq!(state.status, SessionStatus::Failed);
}
