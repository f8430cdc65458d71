use std::fmt;

use super::errors::TokenConfigError;

/// Minimum signing secret length in bytes (the HMAC-SHA-256 key size).
pub const MIN_SECRET_BYTES: usize = 32;

/// Validated token signing configuration.
///
/// Construction is the enforcement point: a `TokenConfig` that exists is
/// usable. Loaded once at startup and never re-read.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    issuer: String,
    audience: String,
    ttl_minutes: i64,
}

impl TokenConfig {
    /// Build a validated signing configuration.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing key material
    /// * `issuer` - Issuer string embedded in and required of every token
    /// * `audience` - Audience string embedded in and required of every token
    /// * `ttl_minutes` - Token lifetime; zero produces already-expired tokens
    ///
    /// # Errors
    /// * `MissingSecret` - The secret is empty
    /// * `SecretTooShort` - The secret is shorter than `MIN_SECRET_BYTES`
    /// * `NegativeTtl` - The lifetime is negative
    pub fn new(
        secret: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl_minutes: i64,
    ) -> Result<Self, TokenConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(TokenConfigError::MissingSecret);
        }
        if secret.len() < MIN_SECRET_BYTES {
            return Err(TokenConfigError::SecretTooShort {
                min: MIN_SECRET_BYTES,
                actual: secret.len(),
            });
        }
        if ttl_minutes < 0 {
            return Err(TokenConfigError::NegativeTtl(ttl_minutes));
        }

        Ok(Self {
            secret,
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes,
        })
    }

    pub(crate) fn secret_bytes(&self) -> &[u8] {
        self.secret.as_bytes()
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }

    pub fn ttl_minutes(&self) -> i64 {
        self.ttl_minutes
    }
}

// Key material stays out of debug output.
impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_minutes", &self.ttl_minutes)
            .finish()
    }
}
