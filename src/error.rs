// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::database::manager::DatabaseError;
use crate::middleware::response::Envelope;
use crate::services::ServiceError;

/// HTTP-facing error. The message is for logs; clients only ever see the
/// `{code, status}` envelope.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError(String),
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// The `status` string written into the envelope
    pub fn status_text(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) | ApiError::ValidationError(_) | ApiError::InvalidJson(_) => {
                "BAD REQUEST"
            }
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::NotFound(_) => "NOT FOUND",
            ApiError::InternalServerError(_) => "INTERNAL SERVER ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE UNAVAILABLE",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError(msg) => msg,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    pub fn to_envelope(&self) -> Envelope<()> {
        Envelope::bare(self.status_code().as_u16(), self.status_text())
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::ConfigMissing(key) => {
                tracing::error!("Database not configured: {}", key);
                ApiError::internal_server_error("Database not configured")
            }
            DatabaseError::Timeout { operation, timeout } => {
                tracing::error!("Database operation '{}' timed out after {:?}", operation, timeout);
                ApiError::internal_server_error("Request processing timed out")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal_server_error("Database error occurred")
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => {
                tracing::debug!("Rejected request: {}", errors);
                ApiError::validation_error(errors.to_string())
            }
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::Database(db_err) => db_err.into(),
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_has_no_data_field() {
        let body = serde_json::to_value(ApiError::not_found("category 9").to_envelope()).unwrap();
        assert_eq!(body, json!({ "code": 404, "status": "NOT FOUND" }));
    }

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::validation_error("name (required)");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.status_text(), "BAD REQUEST");
    }

    #[test]
    fn database_failures_hide_details() {
        let err: ApiError = DatabaseError::Sqlx(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = serde_json::to_value(err.to_envelope()).unwrap();
        assert_eq!(body, json!({ "code": 500, "status": "INTERNAL SERVER ERROR" }));
    }

    #[test]
    fn unauthorized_uses_lowercase_status() {
        let body = serde_json::to_value(ApiError::unauthorized("missing key").to_envelope()).unwrap();
        assert_eq!(body, json!({ "code": 401, "status": "unauthorized" }));
    }
}
