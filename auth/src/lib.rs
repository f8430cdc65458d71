//! Authentication utilities library
//!
//! Provides the security-sensitive building blocks for the student records
//! services:
//! - Password hashing and verification (Argon2id)
//! - Signed, time-bounded identity tokens (HMAC-SHA-256)
//!
//! The crate knows nothing about accounts, storage, or HTTP. Services adapt
//! their own domain types at the boundary (`TokenSubject` in, `AccessClaims`
//! out), which keeps the cryptographic surface reusable and testable on its
//! own.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("hunter42").unwrap();
//! assert!(hasher.verify("hunter42", &hash));
//! assert!(!hasher.verify("wrong", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenConfig, TokenService, TokenSubject};
//!
//! let config = TokenConfig::new(
//!     "secret_key_at_least_32_bytes_long!!!",
//!     "records",
//!     "records-api",
//!     60,
//! )
//! .unwrap();
//! let tokens = TokenService::new(config);
//!
//! let issued = tokens
//!     .issue(&TokenSubject {
//!         id: 7,
//!         username: "alice".to_string(),
//!         display_name: "Alice A".to_string(),
//!         role: "User".to_string(),
//!     })
//!     .unwrap();
//!
//! let claims = tokens.validate(&issued.token).expect("fresh token validates");
//! assert_eq!(claims.subject_id(), Some(7));
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::AccessClaims;
pub use token::IssuedToken;
pub use token::TokenConfig;
pub use token::TokenConfigError;
pub use token::TokenError;
pub use token::TokenService;
pub use token::TokenSubject;
