use async_trait::async_trait;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use axum::Router;
use folio_contact_relay::{AppState, MailError, Mailer, OutgoingEmail, RelayConfig, SmtpCredentials, router};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Records every email instead of sending it.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail: bool,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, _credentials: &SmtpCredentials, email: &OutgoingEmail) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Smtp("connection refused".into()));
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

fn configured() -> RelayConfig {
    RelayConfig::default().with_credentials("owner@gmail.com", "app-password")
}

fn app(config: RelayConfig, mailer: Arc<RecordingMailer>) -> Router {
    router(AppState::new(config, mailer))
}

fn post_json(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/send-email")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn valid_body() -> Value {
    json!({ "name": "Grace Hopper", "email": "grace@example.org", "message": "Would love to chat about compilers." })
}

#[tokio::test]
async fn invalid_fields_return_400_with_joined_messages() {
    let mailer = Arc::new(RecordingMailer::default());
    let response = app(configured(), mailer.clone())
        .oneshot(post_json(json!({ "name": "Al", "email": "bad-email", "message": "short" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(
        body["error"],
        "A valid email address is required. Message must be at least 10 characters"
    );
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn every_invalid_field_is_reported() {
    let response = app(configured(), Arc::new(RecordingMailer::default()))
        .oneshot(post_json(json!({ "name": "A", "email": "bad-email", "message": "short" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(
        body["error"],
        "Name must be at least 2 characters. A valid email address is required. Message must be at least 10 characters"
    );
}

#[tokio::test]
async fn malformed_body_fails_validation_not_the_server() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/send-email")
        .body(Body::from("not json"))
        .unwrap();
    let response = app(configured(), Arc::new(RecordingMailer::default())).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_credentials_return_500_without_sending() {
    let mailer = Arc::new(RecordingMailer::default());
    let response = app(RelayConfig::default(), mailer.clone())
        .oneshot(post_json(valid_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["error"], "Email service is not configured");
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn valid_message_is_forwarded() {
    let mailer = Arc::new(RecordingMailer::default());
    let response = app(configured(), mailer.clone()).oneshot(post_json(valid_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        read_json(response).await,
        json!({ "success": true, "message": "Email sent successfully" })
    );

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].owner, "owner@gmail.com");
    assert_eq!(sent[0].reply_email, "grace@example.org");
    assert_eq!(sent[0].subject, "Portfolio Inquiry from Grace Hopper");
}

#[tokio::test]
async fn transport_failure_is_a_generic_500() {
    let mailer = Arc::new(RecordingMailer {
        fail: true,
        ..Default::default()
    });
    let response = app(configured(), mailer).oneshot(post_json(valid_body())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Failed to send email. Please try again later.");
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn other_methods_are_rejected_with_405() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let request = Request::builder()
            .method(method.clone())
            .uri("/api/send-email")
            .body(Body::empty())
            .unwrap();
        let response = app(configured(), Arc::new(RecordingMailer::default())).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(read_json(response).await["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/send-email")
        .header(header::ORIGIN, "https://portfolio.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app(configured(), Arc::new(RecordingMailer::default())).oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
    assert!(methods.contains("POST"));
}

#[tokio::test]
async fn responses_carry_cors_headers() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/send-email")
        .header(header::ORIGIN, "https://portfolio.example")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(valid_body().to_string()))
        .unwrap();
    let response = app(configured(), Arc::new(RecordingMailer::default())).oneshot(request).await.unwrap();
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
