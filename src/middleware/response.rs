use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// Uniform `{code, status, data?}` body written by every endpoint
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize> {
    pub code: u16,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl Envelope<()> {
    /// Envelope without a `data` field
    pub fn bare(code: u16, status: &'static str) -> Self {
        Self {
            code,
            status,
            data: None,
        }
    }
}

/// Wrapper for successful responses; always 200 with status "OK"
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { data: Some(data) }
    }
}

impl ApiResponse<()> {
    /// Success envelope with no `data` field
    pub fn empty() -> Self {
        Self { data: None }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let envelope = Envelope {
            code: StatusCode::OK.as_u16(),
            status: "OK",
            data: self.data,
        };

        (StatusCode::OK, Json(envelope)).into_response()
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
