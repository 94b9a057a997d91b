//! Argon2id password hashing.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use flatseller_config::PasswordHashingConfig;

use crate::AuthError;

/// Argon2id hasher with configured cost parameters.
///
/// Hashing and verification are CPU bound and run on the blocking pool.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    pub fn new(config: &PasswordHashingConfig) -> Result<Self, AuthError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|err| AuthError::PasswordHash(err.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    pub async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let argon2 = self.argon2();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| AuthError::PasswordHash(err.to_string()))
        })
        .await
        .map_err(|err| AuthError::PasswordHash(err.to_string()))?
    }

    /// `Ok(false)` on mismatch. A stored value that is not a PHC string is an
    /// error. The cost parameters embedded in the stored hash win over the
    /// configured ones.
    pub async fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, AuthError> {
        let argon2 = self.argon2();
        let password = password.to_owned();
        let stored_hash = stored_hash.to_owned();

        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&stored_hash)
                .map_err(|err| AuthError::PasswordHash(err.to_string()))?;
            Ok(argon2.verify_password(password.as_bytes(), &parsed).is_ok())
        })
        .await
        .map_err(|err| AuthError::PasswordHash(err.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> PasswordHasher {
        PasswordHasher::new(&PasswordHashingConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn hash_is_salted_phc_string() {
        let hasher = cheap();
        let first = hasher.hash("hunter2").await.unwrap();
        let second = hasher.hash("hunter2").await.unwrap();

        assert!(first.starts_with("$argon2id$"));
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn verify_accepts_only_the_original_password() {
        let hasher = cheap();
        let hash = hasher.hash("hunter2").await.unwrap();

        assert!(hasher.verify("hunter2", &hash).await.unwrap());
        assert!(!hasher.verify("hunter3", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn verify_rejects_garbage_hashes() {
        assert!(cheap().verify("pw", "not-a-hash").await.is_err());
    }

    #[test]
    fn zero_memory_is_rejected() {
        let config = PasswordHashingConfig {
            memory_kib: 0,
            iterations: 1,
            parallelism: 1,
        };
        assert!(PasswordHasher::new(&config).is_err());
    }
}
