/*
 * Responsibility
 * - /blogs 系 CRUD handler + 集計
 * - Path の {blog_id} は公開 ID → extractor で復号して内部 ID として受け取る
 * - create/delete は resolver が解決した CurrentUser を前提にする
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::blogs::{BlogResponse, BlogStatsResponse, CreateBlogRequest, UpdateBlogRequest},
        extractors::{
            current_user::CurrentUserExtractor, json::ApiJson, public_id::PublicBlogId,
        },
    },
    error::AppError,
    repos::blog_repo,
    services::blog_stats,
    state::AppState,
};

fn row_to_response(state: &AppState, row: blog_repo::BlogRow) -> Result<BlogResponse, AppError> {
    let public_id = state.id_codec.encode(row.blog_id)?;

    Ok(BlogResponse {
        id: public_id,
        title: row.title,
        author: row.author,
        url: row.url,
        likes: row.likes,
        user_id: row.user_id.to_string(),
    })
}

pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let rows = blog_repo::list(&state.db).await?;

    let mut res = Vec::with_capacity(rows.len());
    for row in rows {
        res.push(row_to_response(&state, row)?);
    }

    Ok(Json(res))
}

pub async fn get_blog(
    State(state): State<AppState>,
    blog_id: PublicBlogId,
) -> Result<Json<BlogResponse>, AppError> {
    let row = blog_repo::get(&state.db, blog_id.id)
        .await?
        .ok_or_else(|| AppError::not_found("blog"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn create_blog(
    State(state): State<AppState>,
    CurrentUserExtractor(current): CurrentUserExtractor,
    ApiJson(req): ApiJson<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogResponse>), AppError> {
    req.validate().map_err(AppError::validation)?;

    // The resolver attaches None when the subject no longer exists;
    // creating a blog needs an existing creator.
    let user = current
        .0
        .ok_or_else(|| AppError::validation("userId missing or not valid"))?;

    let row = blog_repo::create(
        &state.db,
        &req.title,
        req.author.as_deref().unwrap_or(""),
        &req.url,
        req.likes.unwrap_or(0),
        user.id,
    )
    .await?;

    let res = row_to_response(&state, row)?;
    Ok((StatusCode::CREATED, Json(res)))
}

pub async fn update_blog(
    State(state): State<AppState>,
    blog_id: PublicBlogId,
    ApiJson(req): ApiJson<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let row = blog_repo::update(
        &state.db,
        blog_id.id,
        req.title.as_deref(),
        req.author.as_deref(),
        req.url.as_deref(),
        req.likes,
    )
    .await?
    .ok_or_else(|| AppError::not_found("blog"))?;

    Ok(Json(row_to_response(&state, row)?))
}

pub async fn delete_blog(
    State(state): State<AppState>,
    CurrentUserExtractor(current): CurrentUserExtractor,
    blog_id: PublicBlogId,
) -> Result<StatusCode, AppError> {
    let user = current
        .0
        .ok_or_else(|| AppError::validation("userId missing or not valid"))?;

    let row = blog_repo::get(&state.db, blog_id.id)
        .await?
        .ok_or_else(|| AppError::not_found("blog"))?;

    // Only the creator may delete.
    if row.user_id != user.id {
        return Err(AppError::unauthorized("invalid user"));
    }

    blog_repo::delete(&state.db, blog_id.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_blog_stats(
    State(state): State<AppState>,
) -> Result<Json<BlogStatsResponse>, AppError> {
    let rows = blog_repo::list(&state.db).await?;

    let total_likes = blog_stats::total_likes(&rows);
    let favorite = match blog_stats::favorite_blog(&rows) {
        Some(row) => Some(row_to_response(&state, row.clone())?),
        None => None,
    };

    Ok(Json(BlogStatsResponse {
        count: rows.len(),
        total_likes,
        favorite,
    }))
}
