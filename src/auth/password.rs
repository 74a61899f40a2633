use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use once_cell::sync::Lazy;
use rand_core::OsRng;
use thiserror::Error;

static CONTEXT: Lazy<Argon2<'static>> = Lazy::new(|| {
    Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        argon2::Params::default(),
    )
});

#[derive(Debug, Error)]
#[error("Failed to generate password hash: {0}")]
pub struct PasswordError(String);

/// Produce a salted Argon2id digest in PHC string format.
pub fn hash(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = CONTEXT
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError(e.to_string()))?;

    Ok(digest.to_string())
}

/// Check `password` against a stored digest. A digest that cannot be parsed never verifies.
pub fn verify(password: &str, digest: &str) -> bool {
    let parsed = match PasswordHash::new(digest) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!("Stored password digest is malformed: {}", e);
            return false;
        }
    };

    CONTEXT.verify_password(password.as_bytes(), &parsed).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let digest = hash("p1").unwrap();
        assert!(digest.starts_with("$argon2id$"));
        assert!(verify("p1", &digest));
        assert!(!verify("p2", &digest));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash("same").unwrap();
        let b = hash("same").unwrap();
        assert_ne!(a, b);
        assert!(verify("same", &a));
        assert!(verify("same", &b));
    }

    #[test]
    fn malformed_digest_is_a_mismatch() {
        assert!(!verify("p1", "not-a-digest"));
        assert!(!verify("p1", ""));
    }
}
