use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::domain::account::errors::DisplayNameError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordError;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::UpdateProfileCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

/// Handler for PUT /auth/profile. Only provided fields change; a password
/// change requires the current and the new password together.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
    Json(body): Json<UpdateProfileRequestBody>,
) -> Result<ApiSuccess<UpdatedProfileResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .account_service
        .update_profile(current.account_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// The raw profile update request body. Absent fields stay untouched.
// No Debug derive: the body may carry raw passwords.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequestBody {
    full_name: Option<String>,
    email: Option<String>,
    current_password: Option<String>,
    new_password: Option<String>,
}

/// Errors produced when parsing the body into a domain command.
#[derive(Debug, Clone, Error)]
enum ParseUpdateProfileRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordError),

    #[error("Invalid full name: {0}")]
    FullName(#[from] DisplayNameError),
}

impl UpdateProfileRequestBody {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ParseUpdateProfileRequestError> {
        let display_name = self.full_name.map(DisplayName::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        let new_password = self.new_password.map(Password::new).transpose()?;
        Ok(UpdateProfileCommand {
            display_name,
            email,
            current_password: self.current_password,
            new_password,
        })
    }
}

impl From<ParseUpdateProfileRequestError> for ApiError {
    fn from(err: ParseUpdateProfileRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

/// The profile as stored after the update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedProfileResponseData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&AccountProfile> for UpdatedProfileResponseData {
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
