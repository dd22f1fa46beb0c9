use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= Identity Types =============

/// Closed set of roles a user record can hold.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Elevated role; passes the role gate and ownership overrides.
    Admin,
    /// Default role assigned at registration.
    #[default]
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Role::Admin),
            "customer" => Some(Role::Customer),
            _ => None,
        }
    }
}

/// The identity claim carried inside a token and bound to each
/// authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Identity::new(&user.id, &user.name, &user.email, user.role)
    }
}

/// Signed token payload: the identity plus issued-at and expiry timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(flatten)]
    pub identity: Identity,
    pub iat: i64,
    pub exp: i64,
}

// ============= Stored Records =============

/// User record as held by the document store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            _ => None,
        }
    }
}

/// One product line of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderLine {
    /// Product identifier
    pub product: String,
    /// Quantity ordered, at least 1
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    /// Id of the user who owns the order
    pub user: String,
    pub products: Vec<OrderLine>,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created_at: i64,
    pub updated_at: i64,
}

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisteredUser {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: RegisteredUser,
}

/// Missing fields default to empty so they fail like any other wrong
/// credential instead of as a malformed body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// User as returned by the API. The password digest is never included.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
    pub is_verified: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            is_verified: user.is_verified,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub products: Vec<OrderLine>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCategoryRequest {
    pub name: String,
    pub description: String,
}

/// Generic `{ "message": ... }` body used for errors and acknowledgements.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============= Error Types =============

/// Client-facing message for every authentication failure.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";
/// Client-facing message for every authorization failure.
pub const FORBIDDEN: &str = "Forbidden";
/// Status used for authorization failures. Kept at 401 rather than 403 to
/// match the established API contract.
pub const FORBIDDEN_STATUS: StatusCode = StatusCode::UNAUTHORIZED;

/// Authentication and authorization failures.
///
/// Every variant collapses to one of two generic responses at the HTTP
/// boundary; the variant itself is only visible in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("credentials did not match")]
    CredentialInvalid,

    #[error("authorization header missing")]
    TokenMissing,

    #[error("authorization header or token malformed")]
    TokenMalformed,

    #[error("token expired")]
    TokenExpired,

    #[error("token signature invalid")]
    TokenSignatureInvalid,

    #[error("identity lacks the required role")]
    InsufficientRole,

    #[error("identity does not own the resource")]
    NotOwner,
}

impl AuthError {
    /// True for failures that reject the identity itself, false for
    /// failures that reject what an established identity may do.
    pub fn is_authentication(&self) -> bool {
        !matches!(self, AuthError::InsufficientRole | AuthError::NotOwner)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "request rejected");

        let (status, message) = if self.is_authentication() {
            (StatusCode::UNAUTHORIZED, AUTHENTICATION_FAILED)
        } else {
            (FORBIDDEN_STATUS, FORBIDDEN)
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Auth(err) => return err.into_response(),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Database(msg) | AppError::Config(msg) | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(MessageResponse::new(message))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""admin""#);
        let role: Role = serde_json::from_str(r#""customer""#).unwrap();
        assert_eq!(role, Role::Customer);
        assert!(serde_json::from_str::<Role>(r#""root""#).is_err());
    }

    #[test]
    fn claims_flatten_identity_fields() {
        let claims = Claims {
            identity: Identity::new("u1", "Ada", "ada@example.com", Role::Customer),
            iat: 100,
            exp: 3700,
        };
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["id"], "u1");
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["email"], "ada@example.com");
        assert_eq!(value["role"], "customer");
        assert_eq!(value["exp"], 3700);
    }

    #[test]
    fn auth_errors_collapse_to_two_responses() {
        for err in [
            AuthError::CredentialInvalid,
            AuthError::TokenMissing,
            AuthError::TokenMalformed,
            AuthError::TokenExpired,
            AuthError::TokenSignatureInvalid,
        ] {
            assert!(err.is_authentication());
            assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
        }

        for err in [AuthError::InsufficientRole, AuthError::NotOwner] {
            assert!(!err.is_authentication());
            assert_eq!(err.into_response().status(), FORBIDDEN_STATUS);
        }
    }

    #[test]
    fn internal_errors_do_not_leak_detail() {
        let response = AppError::Database("UNIQUE constraint failed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn order_status_parses_known_values() {
        assert_eq!(OrderStatus::parse("shipped"), Some(OrderStatus::Shipped));
        assert_eq!(OrderStatus::parse("lost"), None);
        assert_eq!(OrderStatus::default().as_str(), "pending");
    }
}
