/*
 * Responsibility
 * - Handler から見える「解決済み user コンテキスト」の型
 * - middleware が検証・解決して request extensions に格納し、
 *   handler はこの型だけを受け取る
 *
 * Notes
 * - 内側の Option は「lookup が空振りした」状態。resolver はここで拒否せず、
 *   user を必須とする handler 側が判断する
 */
use uuid::Uuid;

use crate::repos::user_repo::UserRow;

/// Attached by the user-resolver middleware for every request it lets
/// through. `CurrentUser(None)` means the token was valid but the subject no
/// longer exists in the store.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<AuthUser>);

/// The resolved identity record. Deliberately excludes the password hash.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub name: String,
}

impl AuthUser {
    pub fn from_row(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            name: row.name,
        }
    }
}
