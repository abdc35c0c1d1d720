pub mod auth;
pub mod blog_stats;
pub mod id_codec;
pub mod password;
