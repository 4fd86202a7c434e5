// API Errors
// Every failure leaves the service as `{"detail": "<message>"}`

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::services::{ClassifierError, HumanizeError};

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Classifier unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Classifier request failed: {0}")]
    BadGateway(String),

    #[error("{0}")]
    Internal(String),

    #[error("Not Found")]
    NotFound,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected { status, .. } => *status,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<HumanizeError> for ApiError {
    fn from(e: HumanizeError) -> Self {
        match e {
            HumanizeError::InvalidInput(msg) => ApiError::BadRequest(msg),
            HumanizeError::InvalidParameter { .. } => ApiError::Unprocessable(e.to_string()),
            HumanizeError::InternalInconsistency { .. } => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ClassifierError> for ApiError {
    fn from(e: ClassifierError) -> Self {
        match e {
            ClassifierError::NotConfigured => ApiError::ServiceUnavailable(e.to_string()),
            other => ApiError::BadGateway(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = %status, "{}", self);
        } else {
            warn!(status = %status, "{}", self);
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_error_mapping() {
        let e: ApiError = HumanizeError::InvalidInput("text must be a non-empty string".into()).into();
        assert_eq!(e.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(e.to_string(), "text must be a non-empty string");

        let e: ApiError = HumanizeError::InvalidParameter { name: "p_trans".into(), value: 2.0 }.into();
        assert_eq!(e.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let e: ApiError = HumanizeError::InternalInconsistency {
            unresolved: vec![],
            missing: vec!["x".into()],
        }
        .into();
        assert_eq!(e.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_classifier_error_mapping() {
        let e: ApiError = ClassifierError::NotConfigured.into();
        assert_eq!(e.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        let e: ApiError = ClassifierError::MissingScores.into();
        assert_eq!(e.status_code(), StatusCode::BAD_GATEWAY);
    }
}
