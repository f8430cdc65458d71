use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::account::errors::DisplayNameError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordError;
use crate::domain::account::errors::UsernameError;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::Username;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Handler for POST /auth/register. Always creates a regular user; admin
/// accounts are provisioned out of band.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::CREATED, profile.into()))
}

/// The raw registration request body.
// No Debug derive: the body carries a raw password.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    username: String,
    email: String,
    password: String,
    full_name: String,
}

/// Errors produced when parsing the body into a domain command.
#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),

    #[error("Invalid full name: {0}")]
    FullName(#[from] DisplayNameError),
}

impl RegisterRequestBody {
    /// Validate all fields and convert into a [`RegisterAccountCommand`].
    fn try_into_command(self) -> Result<RegisterAccountCommand, ParseRegisterRequestError> {
        let username = Username::new(self.username)?;
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let display_name = DisplayName::new(self.full_name)?;
        Ok(RegisterAccountCommand::new(
            username,
            email,
            password,
            display_name,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// The registration response: the stored account, minus anything secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponseData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&AccountProfile> for RegisterResponseData {
    fn from(profile: &AccountProfile) -> Self {
        Self {
            id: profile.id.0,
            username: profile.username.clone(),
            email: profile.email.clone(),
            full_name: profile.display_name.clone(),
            role: profile.role.to_string(),
            created_at: profile.created_at,
        }
    }
}
