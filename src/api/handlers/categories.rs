use crate::{
    api::extract::Json,
    types::{AppError, Category, CreateCategoryRequest, MessageResponse, Result},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::info;

/// List all categories.
#[utoipa::path(
    get,
    path = "/categories",
    responses(
        (status = 200, description = "All categories", body = Vec<Category>)
    ),
    tag = "categories"
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.categories.list_categories().await?))
}

/// Get a single category.
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 404, description = "Category not found", body = MessageResponse)
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Category>> {
    state
        .categories
        .get_category(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
}

/// Create a category (admin only).
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Invalid input", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse)
    ),
    tag = "categories",
    security(("bearerAuth" = []))
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    let name = payload.name.trim();
    let description = payload.description.trim();
    if name.is_empty() || description.is_empty() {
        return Err(AppError::InvalidInput(
            "Name and description are required".to_string(),
        ));
    }

    let category = state.categories.create_category(name, description).await?;
    info!(category_id = category.id, "category created");

    Ok((StatusCode::CREATED, Json(category)))
}

/// Delete a category (admin only).
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    responses(
        (status = 200, description = "Category deleted", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Category not found", body = MessageResponse)
    ),
    tag = "categories",
    security(("bearerAuth" = []))
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>> {
    if !state.categories.delete_category(id).await? {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    info!(category_id = id, "category deleted");
    Ok(Json(MessageResponse::new("Category deleted successfully")))
}
