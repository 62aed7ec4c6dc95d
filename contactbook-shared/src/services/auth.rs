/// Registration, login, and bearer-token authentication
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use chrono::Duration;
/// use contactbook_shared::services::auth::{AuthService, RegisterInput, TokenSettings};
/// use contactbook_shared::store::memory::MemoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let auth = AuthService::new(
///     Arc::new(MemoryStore::new()),
///     TokenSettings::new("secret-key-at-least-32-bytes-long!", Duration::hours(24)),
/// );
///
/// let session = auth
///     .register(RegisterInput {
///         email: "alice@example.com".to_string(),
///         password: "pw12345".to_string(),
///         name: "Alice".to_string(),
///     })
///     .await?;
///
/// let caller = auth.authenticate(&session.access_token).await?;
/// assert_eq!(caller.user_id, session.id);
/// # Ok(())
/// # }
/// ```

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use super::{ServiceError, ServiceResult};
use crate::auth::context::AuthContext;
use crate::auth::jwt::{self, Claims, JwtError};
use crate::auth::password;
use crate::models::user::{CreateUser, User};
use crate::store::{StoreError, UserStore};

const EMAIL_TAKEN: &str = "Email already registered";

// Deliberately identical for unknown email and wrong password.
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Signing secret and lifetime for issued tokens
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub expires_in: Duration,
}

impl TokenSettings {
    pub fn new(secret: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            secret: secret.into(),
            expires_in,
        }
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Registration request body
#[derive(Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct RegisterInput {
    #[validate(
        email(message = "Please provide a valid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
}

/// Login request body
#[derive(Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LoginInput {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Returned by both register and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub access_token: String,
}

/// Auth component
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenSettings,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenSettings) -> Self {
        Self { users, tokens }
    }

    /// Creates an account and signs the new user in
    ///
    /// # Errors
    ///
    /// - `Validation` for a malformed email, short password, or empty name
    /// - `Conflict` when the email is already registered
    pub async fn register(&self, input: RegisterInput) -> ServiceResult<AuthSession> {
        input.validate()?;

        if self.users.find_user_by_email(&input.email).await?.is_some() {
            return Err(ServiceError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let password_hash = password::hash_password(&input.password)?;

        // A concurrent registration can still win the race past the check above.
        let user = self
            .users
            .insert_user(CreateUser {
                email: input.email,
                password_hash,
                name: input.name,
            })
            .await
            .map_err(|err| match err {
                StoreError::UniqueViolation { .. } => ServiceError::Conflict(EMAIL_TAKEN.to_string()),
                other => ServiceError::Store(other),
            })?;

        info!(user_id = user.id, "User registered");
        self.session_for(user)
    }

    /// Exchanges email and password for a token
    ///
    /// # Errors
    ///
    /// - `Validation` when the body is malformed
    /// - `Unauthorized` with the same message for unknown email and wrong
    ///   password
    pub async fn login(&self, input: LoginInput) -> ServiceResult<AuthSession> {
        input.validate()?;

        let Some(user) = self.users.find_user_by_email(&input.email).await? else {
            debug!("Login rejected: unknown email");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !password::verify_password(&input.password, &user.password_hash)? {
            debug!(user_id = user.id, "Login rejected: password mismatch");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        info!(user_id = user.id, "User logged in");
        self.session_for(user)
    }

    /// Resolves a bearer token to the calling user
    ///
    /// Fails with `Unauthorized` when the token is malformed, badly signed,
    /// expired, or refers to a user that no longer exists.
    pub async fn authenticate(&self, token: &str) -> ServiceResult<AuthContext> {
        let claims = jwt::validate_token(token, &self.tokens.secret).map_err(|err| {
            debug!(error = %err, "Rejected bearer token");
            match err {
                JwtError::Expired => ServiceError::Unauthorized("Token expired".to_string()),
                _ => ServiceError::Unauthorized("Invalid token".to_string()),
            }
        })?;

        let user_id = claims
            .user_id()
            .map_err(|_| ServiceError::Unauthorized("Invalid token".to_string()))?;

        let user = self
            .users
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("User not found".to_string()))?;

        Ok(AuthContext::new(user.id, user.email))
    }

    fn session_for(&self, user: User) -> ServiceResult<AuthSession> {
        let claims = Claims::new(user.id, user.email.clone(), self.tokens.expires_in);
        let access_token = jwt::create_token(&claims, &self.tokens.secret)?;

        Ok(AuthSession {
            id: user.id,
            email: user.email,
            name: user.name,
            access_token,
        })
    }
}
