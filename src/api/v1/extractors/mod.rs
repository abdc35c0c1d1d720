pub mod current_user;
pub mod json;
pub mod public_id;
