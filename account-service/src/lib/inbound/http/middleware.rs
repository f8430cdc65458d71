use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated caller's identity, derived
/// from the validated bearer token and discarded with the request.
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub account_id: AccountId,
    pub username: String,
    pub role: Role,
}

/// Middleware that validates bearer tokens and stores the caller identity
/// in request extensions. Requests without a valid token are answered with
/// 401 before any handler runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    // The token string itself never reaches the log.
    let claims = state.token_service.validate(token).ok_or_else(|| {
        tracing::warn!("Rejected request with invalid or expired bearer token");
        unauthorized("Invalid or expired token")
    })?;

    let account_id = match claims.subject_id() {
        Some(id) => AccountId(id),
        None => {
            tracing::error!("Token passed validation but carries a malformed subject");
            return Err(unauthorized("Invalid token format"));
        }
    };

    let role = claims
        .role
        .parse::<Role>()
        .map_err(|_| unauthorized("Invalid token format"))?;

    req.extensions_mut().insert(CurrentAccount {
        account_id,
        username: claims.username,
        role,
    });

    Ok(next.run(req).await)
}

/// Middleware for admin-gated routes. Layered inside `authenticate`, so
/// the caller identity is already in the request extensions.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, Response> {
    let current = req
        .extensions()
        .get::<CurrentAccount>()
        .ok_or_else(|| unauthorized("Authentication required"))?;

    if current.role != Role::Admin {
        return Err(ApiError::Forbidden("Administrator role required".to_string()).into_response());
    }

    Ok(next.run(req).await)
}

fn unauthorized(message: &str) -> Response {
    ApiError::Unauthorized(message.to_string()).into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header"))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization header format. Expected: Bearer <token>")
    })
}
