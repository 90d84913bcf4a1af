//! Authentication utilities library
//!
//! Provides reusable credential infrastructure for services:
//! - Password hashing (Argon2id) with a tunable cost factor
//! - Constant-time credential verification
//!
//! Each service defines its own authentication traits and adapts these implementations.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(1, 1024).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Registration and Login
//! ```
//! use auth::{AuthenticationError, Authenticator};
//!
//! let auth = Authenticator::with_cost(1, 1024).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify
//! assert!(auth.verify_credentials("password123", &hash).is_ok());
//! assert!(matches!(
//!     auth.verify_credentials("nope", &hash),
//!     Err(AuthenticationError::InvalidCredentials)
//! ));
//! ```

pub mod authenticator;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
