use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote record service could not be reached at all (refused,
    /// network failure, timeout).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The remote record service answered, but rejected the request.
    #[error("Remote service returned {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("{0}")]
    Extraction(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Reqwest(reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl Error {
    /// Connection-class failures are the only ones that may trigger a
    /// silent switch to local storage.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    pub fn is_not_found(&self) -> bool {
        match self {
            Error::NotFound(_) => true,
            Error::Remote { status, .. } => *status == 404,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // A request that failed in flight without any response (reset or
        // closed connection) is a transport failure too.
        let dropped_in_flight = err.is_request() && err.status().is_none();
        if err.is_connect() || err.is_timeout() || dropped_in_flight {
            Error::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            Error::Remote {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            Error::Reqwest(err)
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Json(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Extraction(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            Error::Connection(msg) => (
                StatusCode::BAD_GATEWAY,
                format!("External service unreachable: {}", msg),
            ),
            Error::Remote { status, body } => (
                StatusCode::BAD_GATEWAY,
                format!("External service error ({}): {}", status, body),
            ),
            Error::Reqwest(err) => (
                StatusCode::BAD_GATEWAY,
                format!("External service error: {}", err),
            ),
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Error::Io(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            Error::Multipart(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
