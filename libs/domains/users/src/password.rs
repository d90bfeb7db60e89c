//! Argon2 password hashing

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use resource::{ResourceError, ResourceResult};

/// Hash `password` into a PHC string with a fresh salt
pub fn hash_password(password: &str) -> ResourceResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ResourceError::Internal(format!("password hashing failed: {e}")))
}

/// Check `password` against a stored PHC string
pub fn verify_password(password: &str, hash: &str) -> ResourceResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ResourceError::Internal(format!("stored password hash is malformed: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_verifies_only_original_password() {
        let hash = hash_password("s3cret").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash).unwrap());
        assert!(!verify_password("other", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        assert_ne!(hash_password("same").unwrap(), hash_password("same").unwrap());
    }

    #[test]
    fn test_malformed_hash_is_internal_error() {
        let err = verify_password("x", "not-a-hash").unwrap_err();
        assert!(matches!(err, ResourceError::Internal(_)));
    }
}
