use thiserror::Error;

/// Error type for password hashing operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("cannot hash an empty secret")]
    EmptySecret,

    #[error("password hashing failed: {0}")]
    HashingFailed(String),
}
