/// Caller identity for authenticated requests
///
/// The API's bearer-token middleware resolves an [`AuthContext`] and stores it
/// in the request extensions; handlers pick it up with
/// `Extension<AuthContext>`.
///
/// ```ignore
/// use axum::Extension;
/// use contactbook_shared::auth::context::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use serde::{Deserialize, Serialize};

/// Authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Verified user id
    pub user_id: i64,

    /// Email of the verified user, as currently stored
    pub email: String,
}

impl AuthContext {
    pub fn new(user_id: i64, email: impl Into<String>) -> Self {
        Self {
            user_id,
            email: email.into(),
        }
    }
}

/// Extracts the token from an `Authorization` header value
///
/// The scheme is matched case-insensitively; an empty token yields `None`.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
