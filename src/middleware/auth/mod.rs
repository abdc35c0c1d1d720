/*
 * Responsibility
 * - 認証系 middleware の公開インターフェース
 * - token: Authorization ヘッダからの抽出 (拒否しない)
 * - user:  token 検証 + user 解決 (保護 route のみに適用)
 */
pub mod token;
pub mod user;
