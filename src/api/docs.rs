use crate::api::handlers::{auth, categories, index, orders, users};
use crate::types::{
    Category, CreateCategoryRequest, CreateOrderRequest, LoginRequest, MessageResponse, Order,
    OrderLine, OrderStatus, RegisterRequest, RegisterResponse, RegisteredUser, Role,
    TokenResponse, UpdateOrderStatusRequest, UpdateUserRequest, UserResponse,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Ecomm API", description = "E-commerce REST backend"),
    paths(
        index::index,
        auth::register,
        auth::login,
        users::list_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
        orders::delete_order,
        categories::list_categories,
        categories::get_category,
        categories::create_category,
        categories::delete_category,
    ),
    components(schemas(
        Role,
        RegisterRequest,
        RegisterResponse,
        RegisteredUser,
        LoginRequest,
        TokenResponse,
        UpdateUserRequest,
        UserResponse,
        OrderLine,
        OrderStatus,
        Order,
        CreateOrderRequest,
        UpdateOrderStatusRequest,
        Category,
        CreateCategoryRequest,
        MessageResponse,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "users", description = "Registration, login and user management"),
        (name = "orders", description = "Orders"),
        (name = "categories", description = "Product categories"),
        (name = "index", description = "Landing")
    )
)]
pub struct ApiDoc;

/// Registers the `bearerAuth` scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
