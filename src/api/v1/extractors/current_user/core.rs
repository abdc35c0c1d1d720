use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

use super::CurrentUser;

/// Handler で CurrentUser を受け取るための extractor
/// middleware が CurrentUser を request.extensions() に insert 済みである前提
/// 見つからない場合は 401 (認証がかかってない・ミドルウェア未設定)
pub struct CurrentUserExtractor(pub CurrentUser);

impl FromRequestParts<AppState> for CurrentUserExtractor
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(CurrentUserExtractor)
            .ok_or_else(|| AppError::unauthorized("token invalid"))
    }
}
