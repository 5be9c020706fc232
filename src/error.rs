use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Failures inside the WebSocket gateway. None of these are fatal to the
/// process; each is handled where it occurs.
#[derive(Debug)]
pub enum GatewayError {
    /// Inbound frame could not be decoded into an event.
    Decode(String),
    /// Outbound queue of a single session is closed.
    Delivery { session_id: String },
    /// Peer closed the connection or the stream ended.
    ConnectionClosed,
    /// Underlying socket failed.
    Transport(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Decode(e) => write!(f, "failed to decode message: {e}"),
            GatewayError::Delivery { session_id } => {
                write!(f, "failed to deliver to session {session_id}")
            }
            GatewayError::ConnectionClosed => write!(f, "connection closed"),
            GatewayError::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        GatewayError::Decode(e.to_string())
    }
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "invalid_request",
            AppError::NotFound(_) => "not_found",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::BadRequest(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.message()
            }
        });
        (self.status(), Json(body)).into_response()
    }
}
