use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Every failed field check, in field order.
    #[error("{}", .0.join(". "))]
    Validation(Vec<String>),

    #[error("Email service is not configured")]
    NotConfigured,

    #[error("Mail transport failed: {0}")]
    Transport(String),

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::NotConfigured => {
                tracing::error!("Missing GMAIL_USER or GMAIL_APP_PASSWORD");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            Self::Transport(_) => {
                tracing::error!("Email send failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to send email. Please try again later.".to_string(),
                )
            }
            Self::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_join_with_full_stops() {
        let err = RelayError::Validation(vec!["First".into(), "Second".into()]);
        assert_eq!(err.to_string(), "First. Second");
    }

    #[test]
    fn transport_detail_is_not_exposed() {
        let response = RelayError::Transport("535 bad credentials".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
