/*
 * Responsibility
 * - POST /login: password 検証 → token 発行
 * - username 不在と password 不一致は同じ 401 にする (列挙攻撃対策)
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::login::{LoginRequest, LoginResponse},
        extractors::json::ApiJson,
    },
    error::AppError,
    repos::user_repo,
    services::password,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = user_repo::find_by_username(&state.db, &req.username).await?;

    let credentials_ok = user
        .as_ref()
        .is_some_and(|u| password::verify(&req.password, &u.password_hash));

    let Some(user) = user.filter(|_| credentials_ok) else {
        return Err(AppError::unauthorized("invalid username or password"));
    };

    let token = state
        .auth
        .sign(user.id, &user.username)
        .map_err(|_| AppError::Internal)?;

    Ok(Json(LoginResponse {
        token,
        username: user.username,
        name: user.name,
    }))
}
