//! Request extractors that keep the `{"message": ...}` error shape.

use crate::types::AppError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    response::{IntoResponse, Response},
};

/// JSON body extractor and response wrapper.
///
/// Bodies that fail to parse (wrong content type, bad syntax, missing or
/// mistyped fields) are rejected with `400 {"message": "Invalid request body"}`.
/// The deserializer's detail is only logged.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    axum::Json<T>: IntoResponse,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "request body rejected");
        AppError::InvalidInput("Invalid request body".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::post, Router};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize)]
    struct Payload {
        count: u32,
    }

    async fn echo(Json(payload): Json<Payload>) -> Json<u32> {
        Json(payload.count)
    }

    async fn send(body: &str, content_type: &str) -> (axum::http::StatusCode, String) {
        let response = Router::new()
            .route("/", post(echo))
            .oneshot(
                Request::post("/")
                    .header("content-type", content_type)
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let (status, body) = send(r#"{"count": 3}"#, "application/json").await;
        assert_eq!(status, axum::http::StatusCode::OK);
        assert_eq!(body, "3");
    }

    #[tokio::test]
    async fn test_rejections_use_message_body() {
        for (body, content_type) in [
            ("{}", "application/json"),
            (r#"{"count": -1}"#, "application/json"),
            ("{not json", "application/json"),
            (r#"{"count": 3}"#, "text/plain"),
        ] {
            let (status, text) = send(body, content_type).await;
            assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
            assert_eq!(text, r#"{"message":"Invalid request body"}"#);
        }
    }
}
