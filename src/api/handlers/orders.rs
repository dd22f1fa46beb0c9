//! Order handlers.
//!
//! Any authenticated user can place orders for themselves. Single-order
//! reads and deletes are allowed for the owner or an administrator; status
//! changes are admin-only and gated by the router. Customers cannot tell a
//! missing order from someone else's.

use crate::{
    api::extract::Json,
    auth::{middleware::AuthUser, policy::Ownership},
    types::{
        AppError, AuthError, CreateOrderRequest, Identity, MessageResponse, Order, OrderStatus,
        Result, UpdateOrderStatusRequest,
    },
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

/// Loads an order the caller may act on. A customer gets the same rejection
/// for an unknown id as for another user's order, so order ids cannot be
/// enumerated; only administrators see 404.
async fn load_visible_order(state: &AppState, identity: &Identity, id: &str) -> Result<Order> {
    match state.orders.get_order(id).await? {
        Some(order) => {
            Ownership::SelfOrAdmin.check(identity, &order.user)?;
            Ok(order)
        }
        None if identity.is_admin() => Err(AppError::NotFound("Order not found".to_string())),
        None => Err(AuthError::NotOwner.into()),
    }
}

/// Place an order owned by the caller.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = Order),
        (status = 400, description = "Invalid input", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse)
    ),
    tag = "orders",
    security(("bearerAuth" = []))
)]
pub async fn create_order(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    if payload.products.is_empty() {
        return Err(AppError::InvalidInput(
            "An order needs at least one product".to_string(),
        ));
    }
    if payload
        .products
        .iter()
        .any(|line| line.product.trim().is_empty() || line.quantity < 1)
    {
        return Err(AppError::InvalidInput(
            "Every product needs an id and a quantity of at least 1".to_string(),
        ));
    }

    let now = Utc::now().timestamp();
    let order = Order {
        id: Uuid::new_v4().to_string(),
        user: identity.id,
        products: payload.products,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    };
    state.orders.create_order(&order).await?;

    info!(order_id = %order.id, user_id = %order.user, "order created");

    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders: every order for administrators, own orders otherwise.
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Orders visible to the caller", body = Vec<Order>),
        (status = 401, description = "Unauthorized", body = MessageResponse)
    ),
    tag = "orders",
    security(("bearerAuth" = []))
)]
pub async fn list_orders(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
) -> Result<Json<Vec<Order>>> {
    let orders = if identity.is_admin() {
        state.orders.list_orders().await?
    } else {
        state.orders.list_orders_for_user(&identity.id).await?
    };

    Ok(Json(orders))
}

/// Get a single order.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Order not found (administrators only)", body = MessageResponse)
    ),
    tag = "orders",
    security(("bearerAuth" = []))
)]
pub async fn get_order(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Order>> {
    let order = load_visible_order(&state, &identity, &id).await?;

    Ok(Json(order))
}

/// Change an order's status (admin only).
#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Order updated", body = Order),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Order not found", body = MessageResponse)
    ),
    tag = "orders",
    security(("bearerAuth" = []))
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderStatusRequest>,
) -> Result<Json<Order>> {
    let order = state
        .orders
        .update_order_status(&id, payload.status)
        .await?
        .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

    info!(order_id = %id, status = order.status.as_str(), "order status changed");

    Ok(Json(order))
}

/// Delete an order.
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Order not found (administrators only)", body = MessageResponse)
    ),
    tag = "orders",
    security(("bearerAuth" = []))
)]
pub async fn delete_order(
    State(state): State<AppState>,
    AuthUser(identity): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let order = load_visible_order(&state, &identity, &id).await?;

    state.orders.delete_order(&id).await?;
    info!(order_id = %id, deleted_by = %identity.id, "order deleted");

    Ok(Json(MessageResponse::new("Order deleted successfully")))
}
