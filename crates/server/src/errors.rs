use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use tracing::{error, warn};

/// Which handler produced an error; selects the generic text for storage failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Submit,
    Read,
    Delete,
    Edit,
    Search,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Operation::Submit => "An error occurred while submitting your form",
            Operation::Read => "An error occurred while reading the submission",
            Operation::Delete => "An error occurred while deleting the submission",
            Operation::Edit => "An error occurred while updating the submission",
            Operation::Search => "An error occurred while searching for submissions",
        }
    }
}

/// JSON error response: `{"error": message}` with the given status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    /// Map a service error; storage details are logged, never returned to the client.
    pub fn from_service(op: Operation, err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => Self::new(StatusCode::BAD_REQUEST, e.to_string()),
            e @ ServiceError::NotFound => Self::new(StatusCode::NOT_FOUND, e.to_string()),
            ServiceError::Storage(cause) => {
                error!(operation = ?op, error = %cause, "submission storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, op.failure_message())
            }
        }
    }

    pub fn invalid_body(err: serde_json::Error) -> Self {
        warn!(error = %err, "rejected request body");
        Self::new(StatusCode::BAD_REQUEST, "Invalid request body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({"error": self.message}))).into_response()
    }
}
