use serde::Deserialize;
use serde::Serialize;

/// The fixed claim set carried by every issued token.
///
/// Every field is mandatory; a token missing any of them fails validation.
/// The subject is the account id in decimal string form, per JWT convention
/// for the `sub` claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: account id, decimal string
    pub sub: String,

    /// Username at issue time
    pub username: String,

    /// Display name at issue time (OIDC-style `name` claim)
    #[serde(rename = "name")]
    pub display_name: String,

    /// Role at issue time
    pub role: String,

    /// Unique token id
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl AccessClaims {
    /// Parse the subject claim back into an account id.
    ///
    /// # Returns
    /// The id, or None if the subject is not a decimal integer
    pub fn subject_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// Identity facts a token is issued for.
///
/// Callers map their own account type into this at the boundary; the token
/// layer has no knowledge of the domain model.
#[derive(Debug, Clone)]
pub struct TokenSubject {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub role: String,
}
