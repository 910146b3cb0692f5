//! Admin Model

use serde::Serialize;

/// Admin account; the password hash never leaves the store layer
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Admin {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

impl Admin {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let hash = Admin::hash_password("saad@petshop").expect("hashing should succeed");
        let admin = Admin {
            id: 1,
            username: "shop_admin".to_string(),
            password_hash: hash,
        };

        assert!(admin.verify_password("saad@petshop").unwrap());
        assert!(!admin.verify_password("wrong-password").unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = Admin::hash_password("same-password").unwrap();
        let b = Admin::hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        let admin = Admin {
            id: 1,
            username: "shop_admin".to_string(),
            password_hash: "not-a-phc-string".to_string(),
        };
        assert!(admin.verify_password("anything").is_err());
    }
}
