/*
 * Responsibility
 * - middleware の公開インターフェース (re-export)
 * - pipeline の並びは app.rs 側で決める:
 *   logger → token extractor → (route 単位で) user resolver → handler
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
