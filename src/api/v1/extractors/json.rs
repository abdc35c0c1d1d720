/*
 * Responsibility
 * - JSON body の受け取り
 * - axum 標準の Json rejection (422 / plain text) を AppError に変換し、
 *   他のエラーと同じ {"error": "<message>"} (400) で返す
 */
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::error::AppError;

/// `axum::Json`, with the rejection routed through `AppError`.
///
/// Handlers take request bodies through this instead of `axum::Json` so a
/// malformed or incomplete payload gets the same error shape as a failed
/// `validate()`.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::post};
    use tower::ServiceExt;

    use crate::api::v1::dto::users::CreateUserRequest;

    async fn handler(ApiJson(req): ApiJson<CreateUserRequest>) -> String {
        req.username
    }

    fn test_app() -> Router {
        Router::new().route("/users", post(handler))
    }

    async fn send(body: &str) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/users")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let res = test_app().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn missing_required_field_is_400_with_error_body() {
        let (status, body) = send(r#"{"name":"x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("username"), "got: {message}");
    }

    #[tokio::test]
    async fn malformed_json_is_400_with_error_body() {
        let (status, body) = send("{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn valid_payload_deserializes() {
        let (status, _) =
            send(r#"{"username":"root","name":"Root","password":"sekret"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }
}
