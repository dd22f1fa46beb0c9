use crate::auth::jwt::TokenService;
use crate::types::{AuthError, Identity};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Pulls the bearer token out of the `Authorization` header.
///
/// The header is split at its first space; the scheme must be `Bearer`
/// (any case) and the remainder must be non-empty.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::TokenMissing)?
        .to_str()
        .map_err(|_| AuthError::TokenMalformed)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::TokenMalformed)?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return Err(AuthError::TokenMalformed);
    }

    Ok(token)
}

/// Authentication step: verifies the bearer token and binds the resulting
/// [`Identity`] to the request. Any failure ends the request with 401.
pub async fn auth_middleware(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = bearer_token(req.headers()).and_then(|token| tokens.verify(token))?;

    debug!(user_id = %identity.id, "request authenticated");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

/// Role gate: lets the request through only when the bound identity is an
/// administrator. Must be layered inside [`auth_middleware`]; a request
/// with no bound identity is rejected.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AuthError> {
    match req.extensions().get::<Identity>() {
        Some(identity) if identity.is_admin() => Ok(next.run(req).await),
        Some(identity) => {
            debug!(user_id = %identity.id, "admin role required");
            Err(AuthError::InsufficientRole)
        }
        None => Err(AuthError::InsufficientRole),
    }
}

/// Extractor for the identity bound by [`auth_middleware`].
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or(AuthError::TokenMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::DEFAULT_TOKEN_TTL_SECS;
    use crate::types::Role;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token(&headers_with("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(&headers_with("bearer abc")), Ok("abc"));
        assert_eq!(bearer_token(&HeaderMap::new()), Err(AuthError::TokenMissing));
        assert_eq!(
            bearer_token(&headers_with("Bearer")),
            Err(AuthError::TokenMalformed)
        );
        assert_eq!(
            bearer_token(&headers_with("Bearer ")),
            Err(AuthError::TokenMalformed)
        );
        assert_eq!(
            bearer_token(&headers_with("Basic dXNlcjpwdw==")),
            Err(AuthError::TokenMalformed)
        );
    }

    fn test_router(tokens: Arc<TokenService>) -> Router {
        let admin = Router::new()
            .route("/admin", get(|| async { "admin" }))
            .route_layer(middleware::from_fn(require_admin));

        Router::new()
            .route(
                "/me",
                get(|AuthUser(identity): AuthUser| async move { identity.id }),
            )
            .merge(admin)
            .route_layer(middleware::from_fn_with_state(tokens, auth_middleware))
    }

    async fn call(router: Router, uri: &str, token: Option<&str>) -> StatusCode {
        let mut builder = HttpRequest::builder().uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        router
            .oneshot(builder.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_identity_bound_for_valid_token() {
        let tokens = Arc::new(TokenService::new("secret", DEFAULT_TOKEN_TTL_SECS).unwrap());
        let token = tokens
            .issue(&Identity::new("u1", "Ada", "ada@example.com", Role::Customer))
            .unwrap();

        let status = call(test_router(tokens), "/me", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_or_invalid_token_is_unauthorized() {
        let tokens = Arc::new(TokenService::new("secret", DEFAULT_TOKEN_TTL_SECS).unwrap());

        assert_eq!(
            call(test_router(tokens.clone()), "/me", None).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            call(test_router(tokens), "/me", Some("garbage")).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_role_gate() {
        let tokens = Arc::new(TokenService::new("secret", DEFAULT_TOKEN_TTL_SECS).unwrap());
        let customer = tokens
            .issue(&Identity::new("u1", "Ada", "ada@example.com", Role::Customer))
            .unwrap();
        let admin = tokens
            .issue(&Identity::new("a1", "Root", "root@example.com", Role::Admin))
            .unwrap();

        assert_eq!(
            call(test_router(tokens.clone()), "/admin", Some(&customer)).await,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            call(test_router(tokens), "/admin", Some(&admin)).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn test_role_gate_fails_closed_without_identity() {
        let router = Router::new()
            .route("/admin", get(|| async { "admin" }))
            .route_layer(middleware::from_fn(require_admin));

        let status = router
            .oneshot(HttpRequest::builder().uri("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status();

        assert_ne!(status, StatusCode::OK);
    }
}
