use crate::{
    api::extract::Json,
    types::{
        AppError, AuthError, Identity, LoginRequest, MessageResponse, RegisterRequest,
        RegisterResponse, RegisteredUser, Result, Role, TokenResponse, User,
    },
    AppState,
};
use axum::{extract::State, http::StatusCode};
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

/// Register a new user
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created successfully", body = RegisterResponse),
        (status = 400, description = "Invalid input or user already exists", body = MessageResponse)
    ),
    tag = "users"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let name = payload.name.trim();
    let email = payload.email.trim();

    // Validate input
    if name.is_empty() || email.is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Name, email and password are required".to_string(),
        ));
    }

    // Check if user exists
    if state.users.get_user_by_email(email).await?.is_some() {
        return Err(AppError::InvalidInput("User already exists".to_string()));
    }

    let password_hash = state.hasher.hash_blocking(payload.password).await?;

    let now = Utc::now().timestamp();
    let user = User {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
        role: Role::Customer,
        is_active: true,
        is_verified: false,
        created_at: now,
        updated_at: now,
    };
    state.users.create_user(&user).await?;

    info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user: RegisteredUser {
                id: user.id,
                name: user.name,
            },
        }),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authentication successful", body = TokenResponse),
        (status = 401, description = "Authentication failed", body = MessageResponse)
    ),
    tag = "users"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    let Some(user) = state.users.get_user_by_email(payload.email.trim()).await? else {
        debug!("login for unknown email");
        return Err(AuthError::CredentialInvalid.into());
    };

    let matched = state
        .hasher
        .verify_blocking(payload.password, user.password_hash.clone())
        .await?;
    if !matched {
        debug!(user_id = %user.id, "login with wrong password");
        return Err(AuthError::CredentialInvalid.into());
    }

    let token = state.tokens.issue(&Identity::from(&user))?;
    info!(user_id = %user.id, "user logged in");

    Ok(Json(TokenResponse { token }))
}
