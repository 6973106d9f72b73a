use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::Rng;

use crate::errors::InternalError;

/// Argon2id password hashing with the server pepper as the argon2 secret
pub struct CredentialHasher {
    password_pepper: String,
}

impl CredentialHasher {
    pub fn new(password_pepper: impl Into<String>) -> Self {
        Self {
            password_pepper: password_pepper.into(),
        }
    }

    fn argon2(&self) -> Result<Argon2<'_>, InternalError> {
        Argon2::new_with_secret(
            self.password_pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| InternalError::crypto("argon2_init", e.to_string()))
    }

    /// Hash a password into PHC string format
    pub fn hash_password(&self, password: &str) -> Result<String, InternalError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);

        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| InternalError::crypto("hash_password", e.to_string()))?
            .to_string();

        Ok(hash)
    }

    /// `Ok(false)` on mismatch or an unparseable stored hash
    pub fn verify_password(&self, stored_hash: &str, password: &str) -> Result<bool, InternalError> {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                return Ok(false);
            }
        };

        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl fmt::Debug for CredentialHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialHasher")
            .field("password_pepper", &"<redacted>")
            .finish()
    }
}

/// Generate a cryptographically secure random password
///
/// 20 characters drawn from upper and lower case letters, digits and symbols.
pub fn generate_secure_password() -> String {
    const PASSWORD_LENGTH: usize = 20;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789\
                             !@#$%^&*()_+-=[]{}|;:,.<>?";

    let mut rng = rand::rng();
    (0..PASSWORD_LENGTH)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEPPER: &str = "test-pepper-for-unit-tests";

    #[test]
    fn test_hash_is_argon2id_phc_string() {
        let hasher = CredentialHasher::new(PEPPER);

        let hash = hasher.hash_password("correct horse").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(!hash.contains("correct horse"));
    }

    #[test]
    fn test_verify_accepts_correct_and_rejects_wrong_password() {
        let hasher = CredentialHasher::new(PEPPER);
        let hash = hasher.hash_password("correct horse").unwrap();

        assert!(hasher.verify_password(&hash, "correct horse").unwrap());
        assert!(!hasher.verify_password(&hash, "wrong horse").unwrap());
    }

    #[test]
    fn test_verify_fails_with_different_pepper() {
        let hash = CredentialHasher::new(PEPPER).hash_password("correct horse").unwrap();

        let other = CredentialHasher::new("another-pepper-value-16");

        assert!(!other.verify_password(&hash, "correct horse").unwrap());
    }

    #[test]
    fn test_verify_garbage_hash_is_mismatch() {
        let hasher = CredentialHasher::new(PEPPER);

        assert!(!hasher.verify_password("not-a-phc-string", "anything").unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        let hasher = CredentialHasher::new(PEPPER);

        assert_ne!(
            hasher.hash_password("repeat").unwrap(),
            hasher.hash_password("repeat").unwrap()
        );
    }

    #[test]
    fn test_generate_secure_password() {
        let password = generate_secure_password();

        assert_eq!(password.len(), 20);
        assert!(password
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)));
        assert_ne!(password, generate_secure_password());
    }
}
