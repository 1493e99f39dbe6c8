use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier, Version,
    password_hash::{self, SaltString},
};
use rand_core::OsRng;
use thiserror::Error;

/// Default cost, well above argon2's own defaults so a hash takes
/// 100ms or more on commodity hardware.
pub const DEFAULT_MEMORY_KIB: u32 = 64 * 1024;
pub const DEFAULT_ITERATIONS: u32 = 3;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error("stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("invalid hashing parameters: {0}")]
    InvalidParams(String),
}

/// Argon2id password hasher producing PHC strings with a random salt.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        // Constant params are within argon2's bounds
        let params = Params::new(
            DEFAULT_MEMORY_KIB,
            DEFAULT_ITERATIONS,
            Params::DEFAULT_P_COST,
            None,
        )
        .unwrap_or_default();
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }
}

impl PasswordHasher {
    /// Hasher with a custom cost: `memory_kib` of memory, `iterations` passes, one lane.
    pub fn with_params(memory_kib: u32, iterations: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::Hashing(e.to_string()))?;
        Ok(hash.to_string())
    }

    /// `Ok(false)` on mismatch. Errors only when `hash` is not a usable PHC string.
    /// Parameters are read from the stored hash, so hashes made under an
    /// older cost still verify.
    pub fn verify(&self, hash: &str, password: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordError::MalformedHash(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::with_params(1024, 1).unwrap()
    }

    #[test]
    fn hash_verify_roundtrip() {
        let hasher = cheap();
        for pw in ["04234", "correct horse battery staple", "", "pässwörd"] {
            let hash = hasher.hash(pw).unwrap();
            assert_ne!(hash, pw);
            assert!(hasher.verify(&hash, pw).unwrap());
        }
    }

    #[test]
    fn wrong_password_is_false() {
        let hasher = cheap();
        let hash = hasher.hash("hunter2").unwrap();
        assert!(!hasher.verify(&hash, "hunter3").unwrap());
        assert!(!hasher.verify(&hash, "").unwrap());
    }

    #[test]
    fn salts_differ() {
        let hasher = cheap();
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn default_cost_is_heavy_argon2id() {
        let hash = PasswordHasher::default().hash("pw").unwrap();
        assert!(hash.starts_with("$argon2id$v=19$m=65536,t=3,p=1$"), "{}", hash);
        // Any hasher verifies it, the cost travels with the hash
        assert!(cheap().verify(&hash, "pw").unwrap());
    }

    #[test]
    fn malformed_hash_is_error() {
        let err = cheap().verify("not-a-hash", "pw").unwrap_err();
        assert!(matches!(err, PasswordError::MalformedHash(_)));
    }

    #[test]
    fn zero_iterations_rejected() {
        assert!(matches!(
            PasswordHasher::with_params(1024, 0),
            Err(PasswordError::InvalidParams(_))
        ));
    }
}
