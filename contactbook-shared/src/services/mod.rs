/// Business logic
///
/// - `auth`: Registration, login, and bearer-token authentication
/// - `contacts`: Contact CRUD scoped to the calling user
///
/// Services are cheap to clone (they hold `Arc`s to their store) and return
/// [`ServiceError`], which the HTTP layer maps onto status codes.

use validator::ValidationErrors;

use crate::auth::{jwt::JwtError, password::PasswordError};
use crate::store::StoreError;

pub mod auth;
pub mod contacts;

/// Result alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error type shared by all services
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Input failed field validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Bad credentials or an unusable bearer token
    #[error("{0}")]
    Unauthorized(String),

    /// Caller is authenticated but does not own the resource
    #[error("{0}")]
    Forbidden(String),

    /// Resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Unique key already taken
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),
}
