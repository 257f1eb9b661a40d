use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::mail::{Mailer, OutgoingEmail};
use crate::validation::validate;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const SEND_EMAIL_PATH: &str = "/api/send-email";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub fn new(config: RelayConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            config: Arc::new(config),
            mailer,
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            SEND_EMAIL_PATH,
            post(send_email)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn method_not_allowed() -> RelayError {
    RelayError::MethodNotAllowed
}

/// Validates the submission and forwards it to the owner's inbox.
///
/// The body is parsed leniently: anything that is not a JSON object simply
/// fails every field check.
pub async fn send_email(State(state): State<AppState>, body: Bytes) -> Result<impl IntoResponse> {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let contact = validate(&body)?;

    let credentials = state.config.credentials.as_ref().ok_or(RelayError::NotConfigured)?;
    let email = OutgoingEmail::compose(&credentials.user, &contact);
    state
        .mailer
        .send(credentials, &email)
        .await
        .map_err(|e| RelayError::Transport(e.to_string()))?;

    Ok(Json(json!({
        "success": true,
        "message": "Email sent successfully",
    })))
}
