use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentAccount;

/// Handler for GET /auth/validate.
///
/// Answers from the validated claims alone, with no store round-trip, so
/// resource services can introspect tokens cheaply. A deactivated account
/// keeps passing here until its token expires.
pub async fn validate_token(
    Extension(current): Extension<CurrentAccount>,
) -> ApiSuccess<ValidateTokenResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        ValidateTokenResponseData {
            user_id: current.account_id.0,
            username: current.username,
            role: current.role.to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateTokenResponseData {
    pub user_id: i64,
    pub username: String,
    pub role: String,
}
