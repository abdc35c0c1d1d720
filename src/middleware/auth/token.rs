//! Bearer token extraction.
//!
//! Pulls the token out of `Authorization: Bearer <token>` and stores it in the
//! request extensions. This stage never rejects: a missing or malformed header
//! becomes an explicit `ExtractedToken(None)` and the request continues
//! unauthenticated. Whether an absent token is acceptable is decided later,
//! per route, by the user resolver.

use axum::{
    Router,
    body::Body,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::state::AppState;

/// Extracted bearer token, always present in extensions after this stage.
/// `None` is the explicit "no usable token" marker.
#[derive(Debug, Clone)]
pub struct ExtractedToken(pub Option<String>);

/// Apply the extractor to the whole `/api/v1` router. It must sit outside
/// (run before) any route-level user resolver.
pub fn apply(router: Router<AppState>) -> Router<AppState> {
    router.layer(middleware::from_fn(extract_token))
}

pub async fn extract_token(mut req: Request<Body>, next: Next) -> Response {
    // Prefix match is case-sensitive with exactly one space, nothing else
    // counts as a bearer token.
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string());

    req.extensions_mut().insert(ExtractedToken(token));

    next.run(req).await
}
