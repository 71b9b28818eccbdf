pub mod auth;
pub mod response;

pub use auth::{auth_gate, ApiKeyAuthorizer, AuthDecision, Authorizer, SharedAuthorizer};
pub use response::{ApiResponse, ApiResult, Envelope};
