//! The reqwest transport against a mock API.

use lesson_admin::application_impl::*;
use lesson_admin::application_port::*;
use lesson_admin::console::Console;
use lesson_admin::domain_model::*;
use lesson_admin::domain_port::*;
use lesson_admin::infra_crypto::AesGcmCipher;
use lesson_admin::infra_http::*;
use lesson_admin::infra_kv::MemoryKvBackend;
use lesson_admin::infra_nav::InMemoryNavigator;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// `Authorization: Basic ` with nothing after the scheme. HTTP parsers drop
/// trailing whitespace from header values, so the server sees `Basic`.
fn basic_without_credentials(request: &Request) -> bool {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_end() == "Basic")
}

fn console_for(server: &MockServer, timeout: Duration) -> Console {
    let cipher = Arc::new(AesGcmCipher::new("wiremock-secret-0123456789abcdefgh").unwrap());
    let store = Arc::new(SecureStore::new(Arc::new(MemoryKvBackend::new()), cipher));
    let transport = Arc::new(ReqwestTransport::try_new(&server.uri(), timeout).unwrap());
    Console::assemble(
        store,
        transport,
        Arc::new(InMemoryNavigator::new("/")),
        DEFAULT_LOGIN_ROUTE,
    )
}

#[tokio::test]
async fn expired_token_is_refreshed_and_request_replayed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lessons"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/lessons"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "title": "Vowels" }])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(basic_without_credentials)
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "fresh",
            "refresh_token": "r2",
            "token_type": "bearer"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let console = console_for(&server, DEFAULT_TIMEOUT);
    console
        .session_service
        .start_session(&User::new("7", "Hoa"), &TokenPair::new("stale", "r1"));

    let response = console
        .private_api
        .send(ApiRequest::get("/lessons"))
        .await
        .unwrap();

    let lessons: serde_json::Value = response.json().unwrap();
    assert_eq!(lessons, json!([{ "title": "Vowels" }]));
    assert_eq!(
        console.session_service.refresh_token(),
        Some(RefreshToken("r2".to_string()))
    );
    assert_eq!(
        console.session_service.current_user(),
        Some(User::new("7", "Hoa"))
    );
}

#[tokio::test]
async fn public_client_sends_json_and_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/lessons"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "title": "Compound sounds" })))
        .respond_with(ResponseTemplate::new(422).set_body_string("title taken"))
        .mount(&server)
        .await;

    let console = console_for(&server, DEFAULT_TIMEOUT);
    let err = console
        .public_api
        .send(ApiRequest::post_json(
            "/lessons",
            json!({ "title": "Compound sounds" }),
        ))
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body, "title taken");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/vocabulary"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::try_new(&server.uri(), Duration::from_millis(50)).unwrap();
    let err = transport
        .send(ApiRequest::get("/vocabulary"), CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Timeout));
}

#[tokio::test]
async fn cancellation_aborts_pending_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/classes"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::try_new(&server.uri(), DEFAULT_TIMEOUT).unwrap();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = transport
        .send(ApiRequest::get("/classes"), cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::Cancelled));
}
