/*
 * Responsibility
 * - blogs CRUD
 * - userId の FK (CASCADE) 前提で削除挙動を意識
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BlogRow {
    #[sqlx(rename = "blogId")]
    pub blog_id: i64,

    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,

    #[sqlx(rename = "userId")]
    pub user_id: Uuid,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

pub async fn list(pool: &PgPool) -> Result<Vec<BlogRow>, RepoError> {
    let rows = sqlx::query_as::<_, BlogRow>(
        r#"
        SELECT
            "blogId", title, author, url, likes, "userId", "createdAt", "updatedAt"
        FROM blogs
        ORDER BY "blogId" DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn create(
    pool: &PgPool,
    title: &str,
    author: &str,
    url: &str,
    likes: i64,
    user_id: Uuid,
) -> Result<BlogRow, RepoError> {
    let row = sqlx::query_as::<_, BlogRow>(
        r#"
        INSERT INTO blogs (title, author, url, likes, "userId")
        VALUES ($1, $2, $3, $4, $5)
        RETURNING
            "blogId", title, author, url, likes, "userId", "createdAt", "updatedAt"
        "#,
    )
    .bind(title)
    .bind(author)
    .bind(url)
    .bind(likes)
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get(pool: &PgPool, blog_id: i64) -> Result<Option<BlogRow>, RepoError> {
    let row = sqlx::query_as::<_, BlogRow>(
        r#"
        SELECT
            "blogId", title, author, url, likes, "userId", "createdAt", "updatedAt"
        FROM blogs
        WHERE "blogId" = $1
        "#,
    )
    .bind(blog_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update(
    pool: &PgPool,
    blog_id: i64,
    title: Option<&str>,
    author: Option<&str>,
    url: Option<&str>,
    likes: Option<i64>,
) -> Result<Option<BlogRow>, RepoError> {
    let row = sqlx::query_as::<_, BlogRow>(
        r#"
        UPDATE blogs
        SET
            title = COALESCE($2, title),
            author = COALESCE($3, author),
            url = COALESCE($4, url),
            likes = COALESCE($5, likes),
            "updatedAt" = now()
        WHERE "blogId" = $1
        RETURNING
            "blogId", title, author, url, likes, "userId", "createdAt", "updatedAt"
        "#,
    )
    .bind(blog_id)
    .bind(title)
    .bind(author)
    .bind(url)
    .bind(likes)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete(pool: &PgPool, blog_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM blogs
        WHERE "blogId" = $1
        "#,
    )
    .bind(blog_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
