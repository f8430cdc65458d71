use thiserror::Error;

/// Error type for token signing configuration.
///
/// Any of these is fatal at startup: a process that cannot build a valid
/// signing configuration must not serve traffic.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("signing secret is missing")]
    MissingSecret,

    #[error("signing secret too short: minimum {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("token lifetime must not be negative, got {0} minutes")]
    NegativeTtl(i64),
}

/// Error type for token issuance.
///
/// Validation has no error type: an invalid token is `None`, whatever the
/// cause.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("failed to encode token: {0}")]
    EncodingFailed(String),
}
