use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::domain::account::models::AccountId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Handler for POST /auth/accounts/:id/deactivate, reachable only through
/// the admin gate.
///
/// Already-inactive ids answer 404, the same as unknown ones.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let id = id
        .parse::<i64>()
        .map(AccountId)
        .map_err(|_| ApiError::BadRequest("Invalid account id".to_string()))?;

    state
        .account_service
        .deactivate(id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
