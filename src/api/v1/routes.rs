/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /blogs, /users, /login
 * - user resolver が必要な route (blog の create/delete) だけに
 *   Handler::layer で適用する。token extractor は app.rs 側で
 *   router 全体に掛かるので、resolver より必ず先に走る
 */
use axum::{
    Router,
    handler::Handler,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::middleware::auth::user::resolve_user;
use crate::state::AppState;

use crate::api::v1::handlers::{
    blogs::{create_blog, delete_blog, get_blog, get_blog_stats, list_blogs, update_blog},
    health::health,
    login::login,
    users::{create_user, list_users},
};

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/blogs",
            get(list_blogs).post(
                create_blog.layer(from_fn_with_state(state.clone(), resolve_user)),
            ),
        )
        .route("/blogs/stats", get(get_blog_stats))
        .route(
            "/blogs/{blog_id}",
            get(get_blog).put(update_blog).delete(
                delete_blog.layer(from_fn_with_state(state, resolve_user)),
            ),
        )
        .route("/users", get(list_users).post(create_user))
        .route("/login", post(login))
}
