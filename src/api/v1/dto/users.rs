/*
 * Responsibility
 * - Users の request/response DTO
 * - passwordHash は response に絶対に出さない
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.trim().len() < 3 {
            return Err("username must be at least 3 characters");
        }
        if self.password.len() < 3 {
            return Err("password must be at least 3 characters");
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_username_is_rejected() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username":"ab","password":"sekret"}"#).unwrap();
        assert_eq!(req.validate(), Err("username must be at least 3 characters"));
    }

    #[test]
    fn short_password_is_rejected() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username":"root","password":"ab"}"#).unwrap();
        assert_eq!(req.validate(), Err("password must be at least 3 characters"));
    }

    #[test]
    fn name_is_optional() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"username":"root","password":"sekret"}"#).unwrap();
        assert_eq!(req.validate(), Ok(()));
        assert_eq!(req.name, None);
    }
}
