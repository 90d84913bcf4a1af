use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Credential coordinator.
///
/// Owns the configured password hasher and turns a failed comparison into a
/// typed error, so callers never branch on a bare `bool`.
#[derive(Clone, Default)]
pub struct Authenticator {
    password_hasher: PasswordHasher,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),
}

impl Authenticator {
    /// Create an authenticator backed by the given hasher.
    pub fn new(password_hasher: PasswordHasher) -> Self {
        Self { password_hasher }
    }

    /// Create an authenticator hashing with an explicit cost factor.
    ///
    /// # Arguments
    /// * `cost` - Argon2 time cost
    /// * `memory_kib` - Argon2 memory cost in KiB
    ///
    /// # Errors
    /// * `PasswordError::InvalidCost` - Parameters rejected by Argon2
    pub fn with_cost(cost: u32, memory_kib: u32) -> Result<Self, PasswordError> {
        PasswordHasher::with_cost(cost, memory_kib).map(Self::new)
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a plaintext password against a stored hash.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be parsed
    pub fn verify_credentials(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<(), AuthenticationError> {
        if self.password_hasher.verify(password, stored_hash)? {
            Ok(())
        } else {
            Err(AuthenticationError::InvalidCredentials)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::with_cost(1, 1024).expect("Failed to build authenticator")
    }

    #[test]
    fn test_verify_credentials_success() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        assert!(authenticator.verify_credentials("my_password", &hash).is_ok());
    }

    #[test]
    fn test_verify_credentials_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.verify_credentials("wrong_password", &hash);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_verify_credentials_corrupt_hash() {
        let result = authenticator().verify_credentials("my_password", "not-a-phc-string");
        assert!(matches!(result, Err(AuthenticationError::PasswordError(_))));
    }
}
