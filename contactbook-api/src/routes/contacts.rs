/// Contact endpoints
///
/// Every route here sits behind the JWT layer, which puts the caller's
/// `AuthContext` in the request extensions.
///
/// - `POST /contacts` - Create
/// - `GET /contacts` - List, newest first
/// - `GET /contacts/:id` - Fetch one
/// - `PATCH /contacts/:id` - Partial update
/// - `DELETE /contacts/:id` - Delete (204)
///
/// Touching another user's contact is `403`; an id that does not exist is
/// `404`; an id that is not an integer is `400`.

use axum::{extract::State, http::StatusCode, Extension};
use contactbook_shared::{
    auth::context::AuthContext,
    models::contact::{Contact, CreateContact, UpdateContact},
};

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{AppJson, AppPath},
    response::ApiResponse,
};

pub async fn create_contact(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthContext>,
    AppJson(input): AppJson<CreateContact>,
) -> ApiResult<(StatusCode, ApiResponse<Contact>)> {
    let contact = state.contacts.create(caller.user_id, input).await?;

    Ok((StatusCode::CREATED, ApiResponse::ok(contact)))
}

pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthContext>,
) -> ApiResult<ApiResponse<Vec<Contact>>> {
    let contacts = state.contacts.list_all(caller.user_id).await?;

    Ok(ApiResponse::ok(contacts))
}

pub async fn get_contact(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthContext>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<ApiResponse<Contact>> {
    let contact = state.contacts.get_one(id, caller.user_id).await?;

    Ok(ApiResponse::ok(contact))
}

/// Absent fields keep their current value.
pub async fn update_contact(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthContext>,
    AppPath(id): AppPath<i64>,
    AppJson(input): AppJson<UpdateContact>,
) -> ApiResult<ApiResponse<Contact>> {
    let contact = state.contacts.update(id, caller.user_id, input).await?;

    Ok(ApiResponse::ok(contact))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthContext>,
    AppPath(id): AppPath<i64>,
) -> ApiResult<StatusCode> {
    state.contacts.remove(id, caller.user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
