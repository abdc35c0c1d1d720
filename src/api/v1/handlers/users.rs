/*
 * Responsibility
 * - /users 系 handler (list / create)
 * - DTO validation → password hash → repo 呼び出し
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::users::{CreateUserRequest, UserResponse},
        extractors::json::ApiJson,
    },
    error::AppError,
    repos::user_repo,
    services::password,
    state::AppState,
};

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>, AppError> {
    let rows = user_repo::list(&state.db).await?;
    let res = rows
        .into_iter()
        .map(|u| UserResponse {
            id: u.id,
            username: u.username,
            name: u.name,
        })
        .collect();

    Ok(Json(res))
}

pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    req.validate().map_err(AppError::validation)?;

    let password_hash = password::hash(&req.password).map_err(|_| AppError::Internal)?;

    let row = user_repo::create(
        &state.db,
        req.username.trim(),
        req.name.as_deref().unwrap_or(""),
        &password_hash,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: row.id,
            username: row.username,
            name: row.name,
        }),
    ))
}
