use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use uuid::Uuid;

use super::claims::AccessClaims;
use super::claims::TokenSubject;
use super::config::TokenConfig;
use super::errors::TokenError;

/// Issues and validates signed, time-bounded identity tokens.
///
/// Tokens are HMAC-SHA-256 signed and bound to the configured issuer and
/// audience, so a token minted for one deployment is worthless to another.
/// Validation applies zero clock-skew tolerance: the validity window is
/// `[issued-at, expires-at)`, and a token checked exactly at its expiry
/// instant is already expired.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    issuer: String,
    audience: String,
    ttl_minutes: i64,
}

/// A freshly issued token together with its expiry instant.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl TokenService {
    /// Create a token service from a validated signing configuration.
    pub fn new(config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret_bytes()),
            algorithm: Algorithm::HS256,
            issuer: config.issuer().to_string(),
            audience: config.audience().to_string(),
            ttl_minutes: config.ttl_minutes(),
        }
    }

    /// Issue a signed token for the given subject.
    ///
    /// Claims are fixed at issue time: subject id, username, display name,
    /// role, a fresh unique `jti`, issued-at now, expiry now + TTL, and the
    /// configured issuer and audience.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed or the expiry overflowed
    pub fn issue(&self, subject: &TokenSubject) -> Result<IssuedToken, TokenError> {
        let now = Utc::now();
        let iat = now.timestamp();
        let exp = (now + Duration::minutes(self.ttl_minutes)).timestamp();

        let claims = AccessClaims {
            sub: subject.id.to_string(),
            username: subject.username.clone(),
            display_name: subject.display_name.clone(),
            role: subject.role.clone(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        // Expiry truncated to whole seconds so the reported instant equals
        // the `exp` claim exactly.
        let expires_at = DateTime::from_timestamp(exp, 0)
            .ok_or_else(|| TokenError::EncodingFailed("expiry out of range".to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Validate a token and return its claims.
    ///
    /// Checks the signature, issuer, audience, and that the current time
    /// falls within `[iat, exp)`. Any failure - bad signature, foreign
    /// issuer or audience, expiry, malformed structure - yields `None`;
    /// callers never learn which check failed, and the token string itself
    /// is never logged.
    pub fn validate(&self, token: &str) -> Option<AccessClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud"]);

        let data = match decode::<AccessClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => data,
            Err(_) => return None,
        };

        let claims = data.claims;
        let now = Utc::now().timestamp();
        // Exact window check on top of the library's: no leeway in either
        // direction, and expiry itself is outside the window.
        if now >= claims.exp || now < claims.iat {
            return None;
        }

        Some(claims)
    }

    /// Validate a token and project a single claim out of it.
    ///
    /// Composed from `validate`: an invalid token yields `None` before the
    /// selector is ever consulted.
    pub fn extract<T>(&self, token: &str, select: impl FnOnce(&AccessClaims) -> T) -> Option<T> {
        self.validate(token).map(|claims| select(&claims))
    }
}
