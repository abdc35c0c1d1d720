/*!
 * Current-user extractor
 *
 * Responsibility:
 * - resolver middleware が extensions に入れた CurrentUser を handler に渡す
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - CurrentUser / AuthUser
 * - CurrentUserExtractor
 */

mod core;
mod types;

pub use core::CurrentUserExtractor;
pub use types::{AuthUser, CurrentUser};
