/// Authentication endpoints
///
/// - `POST /auth/register` - Create an account and receive a token
/// - `POST /auth/login` - Exchange credentials for a token
///
/// Both respond with the same payload:
///
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 1,
///     "email": "alice@example.com",
///     "name": "Alice",
///     "accessToken": "eyJ..."
///   }
/// }
/// ```

use axum::{extract::State, http::StatusCode};
use contactbook_shared::services::auth::{AuthSession, LoginInput, RegisterInput};

use crate::{app::AppState, error::ApiResult, extract::AppJson, response::ApiResponse};

/// Register a new user
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed or unknown fields
/// - `409 Conflict`: Email already registered
pub async fn register(
    State(state): State<AppState>,
    AppJson(input): AppJson<RegisterInput>,
) -> ApiResult<(StatusCode, ApiResponse<AuthSession>)> {
    let session = state.auth.register(input).await?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::ok(session).with_message("User registered successfully"),
    ))
}

/// Log in with email and password
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Unknown email or wrong password (same message)
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginInput>,
) -> ApiResult<ApiResponse<AuthSession>> {
    let session = state.auth.login(input).await?;

    Ok(ApiResponse::ok(session).with_message("Login successful"))
}
