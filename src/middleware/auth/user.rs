//! Token verification → user resolution → CurrentUser in extensions.
//!
//! Applied per route (blog create/delete), always inside the token extractor.
//! Outcomes:
//! - token fails to decode (missing, garbage, bad signature, expired)
//!   → classified token error, rendered as 400 by `AppError`
//! - token decodes but carries no usable subject
//!   → 401 `{"error":"token invalid"}`, nothing further runs
//! - subject present → user looked up; a not-found user is attached as
//!   `CurrentUser(None)` and the handler decides whether that is acceptable

use axum::{
    body::Body, extract::State, http::Request, middleware::Next, response::Response,
};

use crate::api::v1::extractors::current_user::{AuthUser, CurrentUser};
use crate::error::AppError;
use crate::middleware::auth::token::ExtractedToken;
use crate::repos::user_repo;
use crate::state::AppState;

// from_fn は State extractor を受け取れないため、routes.rs 側で
// from_fn_with_state を使って route 単位に掛ける
pub async fn resolve_user(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .extensions()
        .get::<ExtractedToken>()
        .cloned()
        .unwrap_or(ExtractedToken(None));

    // The explicit None marker verifies as the empty string and fails the
    // same way any garbage token does.
    let token = token.0.unwrap_or_default();

    let claims = state
        .auth
        .verify(&token)
        .map_err(|e| AppError::token(e.to_string()))?;

    let Some(user_id) = claims.subject() else {
        return Err(AppError::unauthorized("token invalid"));
    };

    // Lookup runs to completion before the next stage; not-found passes
    // through unchanged.
    let user = user_repo::find_by_id(&state.db, user_id)
        .await?
        .map(AuthUser::from_row);

    req.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use chrono::Utc;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::middleware::auth::token::extract_token;
    use crate::services::auth::{AuthService, Claims};
    use crate::services::id_codec::IdCodec;

    const SECRET: &str = "test-secret";

    fn test_state() -> AppState {
        // connect_lazy: no live database; every test here short-circuits
        // before the lookup would run.
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://postgres@localhost/blog_test")
            .unwrap();
        let id_codec = IdCodec::new(10, "abcdefghijklmnopqrstuvwxyz").unwrap();
        let auth = Arc::new(AuthService::new(SECRET, 3600));
        AppState::new(db, id_codec, auth)
    }

    async fn handler() -> &'static str {
        "handled"
    }

    fn test_app(state: AppState) -> Router {
        // Same shape as routes.rs: resolver per route, extractor outside it.
        Router::new()
            .route("/protected", get(handler))
            .layer(middleware::from_fn_with_state(state.clone(), resolve_user))
            .layer(middleware::from_fn(extract_token))
            .with_state(state)
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    async fn send(app: Router, auth_header: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().uri("/protected");
        if let Some(value) = auth_header {
            builder = builder.header("authorization", value);
        }
        let res = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, body)
    }

    #[tokio::test]
    async fn missing_token_is_a_token_error() {
        let (status, body) = send(test_app(test_state()), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn garbage_token_is_a_token_error() {
        let (status, body) = send(test_app(test_state()), Some("Bearer not.a.token")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn wrong_signature_is_a_token_error() {
        let claims = Claims {
            sub: Some(uuid::Uuid::new_v4().to_string()),
            username: "root".to_string(),
            exp: Utc::now().timestamp() as u64 + 3600,
        };
        let token = sign(&claims, "some-other-secret");

        let (status, _) = send(test_app(test_state()), Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn token_without_subject_is_401_token_invalid() {
        let claims = Claims {
            sub: None,
            username: "root".to_string(),
            exp: Utc::now().timestamp() as u64 + 3600,
        };
        let token = sign(&claims, SECRET);

        let (status, body) = send(test_app(test_state()), Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({"error": "token invalid"}));
    }

    #[tokio::test]
    async fn non_uuid_subject_is_401_token_invalid() {
        let claims = Claims {
            sub: Some("12345".to_string()),
            username: "root".to_string(),
            exp: Utc::now().timestamp() as u64 + 3600,
        };
        let token = sign(&claims, SECRET);

        let (status, body) = send(test_app(test_state()), Some(&format!("Bearer {token}"))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, serde_json::json!({"error": "token invalid"}));
    }
}
