use crate::api::extract::Json;
use crate::auth::middleware::AuthUser;
use serde_json::{json, Value};

/// Authenticated landing endpoint.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API title"),
        (status = 401, description = "Authentication failed")
    ),
    tag = "index",
    security(("bearerAuth" = []))
)]
pub async fn index(AuthUser(_identity): AuthUser) -> Json<Value> {
    Json(json!({ "title": "Ecomm API" }))
}
