pub mod factory;
pub mod service;

pub use factory::build_auth_service;
pub use service::{AuthService, Claims};
