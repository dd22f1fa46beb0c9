use crate::api::docs::ApiDoc;
use crate::api::handlers::{auth, categories, index, orders, users};
use crate::auth::middleware::{auth_middleware, require_admin};
use crate::utils::toml_config::CorsConfig;
use crate::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;

/// Route table with its guards. Public routes carry no layer; every other
/// route runs [`auth_middleware`] first, and admin routes additionally run
/// [`require_admin`] after it.
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/users/register", post(auth::register))
        .route("/users/login", post(auth::login))
        .route("/categories", get(categories::list_categories))
        .route("/categories/{id}", get(categories::get_category));

    let admin_routes = Router::new()
        .route("/users", get(users::list_users))
        .route("/categories", post(categories::create_category))
        .route(
            "/categories/{id}",
            delete(categories::delete_category),
        )
        .route("/orders/{id}/status", put(orders::update_order_status))
        .route_layer(middleware::from_fn(require_admin));

    let protected_routes = Router::new()
        .route("/", get(index::index))
        .route(
            "/users/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/orders",
            get(orders::list_orders).post(orders::create_order),
        )
        .route(
            "/orders/{id}",
            get(orders::get_order).delete(orders::delete_order),
        )
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            auth_middleware,
        ));

    public_routes.merge(protected_routes).with_state(state)
}

/// Full application: routes, OpenAPI document, CORS and request tracing.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    let router = create_router(state);

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/api-docs")
            .url("/api-docs/openapi.json", ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        "/api-docs/openapi.json",
        get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    router.layer(cors).layer(TraceLayer::new_for_http())
}

/// CORS for the configured front-end origins, with credentials.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::PUT, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
