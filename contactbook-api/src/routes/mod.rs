/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `contacts`: Contact CRUD for the authenticated user

use axum::http::Uri;

use crate::error::ApiError;

pub mod auth;
pub mod contacts;
pub mod health;

/// Fallback for paths no route matches
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Cannot find {}", uri.path()))
}
