use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::account::models::AccountProfile;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentAccount;
use crate::inbound::http::router::AppState;

/// Handler for GET /auth/profile.
///
/// Claims can outlive the account state they describe, so this reads the
/// store; a caller deactivated after token issue gets 404 here.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentAccount>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .account_service
        .get_profile(current.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponseData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&AccountProfile> for ProfileResponseData {
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
