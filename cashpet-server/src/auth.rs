//! Password hashing
//!
//! Passwords are stored as argon2 PHC strings with a random per-user salt.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use rand::rngs::OsRng;

use crate::models::Password;

/// Hashing failed (bad parameters or RNG failure)
#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(String);

/// Hash a password into a PHC string (`$argon2id$v=19$...`).
///
/// Argon2 is memory-hard, so the work runs on the blocking thread pool.
pub async fn hash_password(password: Password) -> Result<String, HashError> {
    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| HashError(e.to_string()))?
}

fn hash_blocking(password: &Password) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.expose().as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HashError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    #[tokio::test]
    async fn hash_verifies_and_hides_plaintext() {
        let password = Password::new("correct horse").unwrap();
        let hash = hash_password(password).await.unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("correct horse"));

        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default()
            .verify_password(b"correct horse", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong horse", &parsed)
            .is_err());
    }

    #[tokio::test]
    async fn salts_differ() {
        let a = hash_password(Password::new("same").unwrap()).await.unwrap();
        let b = hash_password(Password::new("same").unwrap()).await.unwrap();
        assert_ne!(a, b);
    }
}
