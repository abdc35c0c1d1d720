//! Password hashing with Argon2id.
//!
//! Stored hashes are PHC strings, so parameters can evolve without a
//! migration: verification reads them back from the hash itself.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

pub fn hash(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Constant result shape on purpose: an unparsable stored hash verifies as
/// false rather than surfacing an error to the login handler.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hashed = hash("sekret").unwrap();
        assert!(verify("sekret", &hashed));
        assert!(!verify("wrong", &hashed));
    }

    #[test]
    fn salts_are_unique() {
        assert_ne!(hash("sekret").unwrap(), hash("sekret").unwrap());
    }

    #[test]
    fn malformed_stored_hash_verifies_false() {
        assert!(!verify("sekret", "not-a-phc-string"));
    }
}
