//! User management handlers.
//!
//! Reads and updates are restricted to the user themselves. Deletes also
//! accept an administrator. Listing is admin-only and gated by the router.

use crate::{
    api::extract::Json,
    auth::{middleware::AuthUser, policy::Ownership},
    types::{AppError, MessageResponse, Result, UpdateUserRequest, UserResponse},
    AppState,
};
use axum::extract::{Path, State};
use tracing::info;

/// List all users (admin only).
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 401, description = "Unauthorized", body = MessageResponse)
    ),
    tag = "users",
    security(("bearerAuth" = []))
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Get a specific user. Only the user themselves may read it.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User data", body = UserResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    ),
    tag = "users",
    security(("bearerAuth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>> {
    Ownership::SelfOnly.check(&identity, &id)?;

    let user = state
        .users
        .get_user_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// Update name and/or email. Only the user themselves may update.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Invalid input", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    ),
    tag = "users",
    security(("bearerAuth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    Ownership::SelfOnly.check(&identity, &id)?;

    let name = payload.name.as_deref().map(str::trim);
    let email = payload.email.as_deref().map(str::trim);

    if name.is_some_and(str::is_empty) || email.is_some_and(str::is_empty) {
        return Err(AppError::InvalidInput(
            "Name and email must not be empty".to_string(),
        ));
    }

    if let Some(email) = email {
        if let Some(existing) = state.users.get_user_by_email(email).await? {
            if existing.id != id {
                return Err(AppError::InvalidInput("Email already in use".to_string()));
            }
        }
    }

    let user = state
        .users
        .update_user(&id, name, email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    info!(user_id = %id, "user updated");

    Ok(Json(user.into()))
}

/// Delete a user. Allowed for the user themselves or an administrator.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "User not found", body = MessageResponse)
    ),
    tag = "users",
    security(("bearerAuth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    Ownership::SelfOrAdmin.check(&identity, &id)?;

    if !state.users.delete_user(&id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    info!(user_id = %id, deleted_by = %identity.id, "user deleted");

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
