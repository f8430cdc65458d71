// Shared by both integration suites; each binary uses a subset.
#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;

use account_service::domain::account::errors::AccountError;
use account_service::domain::account::models::Account;
use account_service::domain::account::models::AccountId;
use account_service::domain::account::models::DisplayName;
use account_service::domain::account::models::EmailAddress;
use account_service::domain::account::models::NewAccount;
use account_service::domain::account::models::Role;
use account_service::domain::account::models::Username;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::ports::AccountStore;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenConfig;
use auth::TokenService;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::Utc;
use tower::ServiceExt;

pub const TEST_TOKEN_SECRET: &str = "integration-test-signing-secret-0123456789";
pub const TEST_TOKEN_ISSUER: &str = "records";
pub const TEST_TOKEN_AUDIENCE: &str = "records-api";

/// In-memory stand-in for the Postgres store with the same contract:
/// sequential ids, usernames and emails unique across active and inactive
/// records, lookups returning active records only.
pub struct InMemoryAccountStore {
    state: Mutex<StoreState>,
}

struct StoreState {
    next_id: i64,
    rows: Vec<Account>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState {
                next_id: 1,
                rows: Vec::new(),
            }),
        }
    }

    /// Insert an account directly, bypassing the service. Mirrors how
    /// admin accounts are provisioned out of band in production.
    pub fn seed(&self, username: &str, email: &str, password: &str, role: Role) -> AccountId {
        let secret_hash = PasswordHasher::new()
            .hash(password)
            .expect("Failed to hash seed password");

        let mut state = self.state.lock().expect("store mutex poisoned");
        let id = AccountId(state.next_id);
        state.next_id += 1;
        state.rows.push(Account {
            id,
            username: Username::new(username.to_string()).expect("valid seed username"),
            email: EmailAddress::new(email.to_string()).expect("valid seed email"),
            secret_hash,
            display_name: DisplayName::new(username.to_string()).expect("valid seed name"),
            role,
            active: true,
            created_at: Utc::now(),
        });
        id
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AccountError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state
            .rows
            .iter()
            .find(|a| {
                a.active && (a.username.as_str() == identifier || a.email.as_str() == identifier)
            })
            .cloned())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.rows.iter().find(|a| a.active && a.id == id).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.rows.iter().any(|a| a.username.as_str() == username))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AccountError> {
        let state = self.state.lock().expect("store mutex poisoned");
        Ok(state.rows.iter().any(|a| a.email.as_str() == email))
    }

    async fn insert(&self, account: NewAccount) -> Result<AccountId, AccountError> {
        // Check-and-insert happens under one lock, mirroring the database
        // unique constraints.
        let mut state = self.state.lock().expect("store mutex poisoned");
        if state
            .rows
            .iter()
            .any(|a| a.username.as_str() == account.username.as_str())
        {
            return Err(AccountError::UsernameAlreadyExists(
                account.username.as_str().to_string(),
            ));
        }
        if state
            .rows
            .iter()
            .any(|a| a.email.as_str() == account.email.as_str())
        {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }

        let id = AccountId(state.next_id);
        state.next_id += 1;
        state.rows.push(Account {
            id,
            username: account.username,
            email: account.email,
            secret_hash: account.secret_hash,
            display_name: account.display_name,
            role: account.role,
            active: account.active,
            created_at: account.created_at,
        });
        Ok(id)
    }

    async fn update(&self, account: &Account) -> Result<u64, AccountError> {
        let mut state = self.state.lock().expect("store mutex poisoned");
        if state
            .rows
            .iter()
            .any(|a| a.id != account.id && a.email.as_str() == account.email.as_str())
        {
            return Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ));
        }
        match state.rows.iter_mut().find(|a| a.id == account.id) {
            Some(row) => {
                *row = account.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

/// A response captured from the in-process router, with the raw bytes kept
/// for byte-level equality assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.bytes).expect("Failed to parse response body as JSON")
    }
}

/// Test application wrapping the real router, driven in-process through
/// `tower::ServiceExt::oneshot`. No sockets, no external database.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryAccountStore>,
    pub service: Arc<dyn AccountServicePort>,
}

impl TestApp {
    pub fn spawn() -> Self {
        let store = Arc::new(InMemoryAccountStore::new());
        let token_config = TokenConfig::new(
            TEST_TOKEN_SECRET,
            TEST_TOKEN_ISSUER,
            TEST_TOKEN_AUDIENCE,
            60,
        )
        .expect("valid test token config");
        let token_service = Arc::new(TokenService::new(token_config));
        let service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
            Arc::clone(&store),
            Arc::clone(&token_service),
        ));
        let router = create_router(Arc::clone(&service), token_service);

        Self {
            router,
            store,
            service,
        }
    }

    async fn execute(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        TestResponse {
            status,
            bytes: bytes.to_vec(),
        }
    }

    pub async fn post(&self, path: &str, body: serde_json::Value) -> TestResponse {
        self.execute(json_request(Method::POST, path, Some(body), None))
            .await
    }

    pub async fn post_authenticated(&self, path: &str, token: &str) -> TestResponse {
        self.execute(json_request(Method::POST, path, None, Some(token)))
            .await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.execute(json_request(Method::GET, path, None, None))
            .await
    }

    pub async fn get_authenticated(&self, path: &str, token: &str) -> TestResponse {
        self.execute(json_request(Method::GET, path, None, Some(token)))
            .await
    }

    pub async fn put_authenticated(
        &self,
        path: &str,
        token: &str,
        body: serde_json::Value,
    ) -> TestResponse {
        self.execute(json_request(Method::PUT, path, Some(body), Some(token)))
            .await
    }

    /// GET with a verbatim Authorization header value, for malformed
    /// header scenarios.
    pub async fn get_with_authorization(&self, path: &str, header_value: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .header(header::AUTHORIZATION, header_value)
            .body(Body::empty())
            .expect("Failed to build request");
        self.execute(request).await
    }

    /// Register an account through the API and return its id.
    pub async fn register_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> i64 {
        let response = self
            .post(
                "/auth/register",
                serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                    "fullName": full_name,
                }),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "registration failed: {:?}",
            response.json()
        );
        response.json()["data"]["id"]
            .as_i64()
            .expect("id in registration response")
    }

    /// Log in through the API and return the bearer token.
    pub async fn login_token(&self, identifier: &str, password: &str) -> String {
        let response = self
            .post(
                "/auth/login",
                serde_json::json!({
                    "usernameOrEmail": identifier,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "login failed: {:?}",
            response.json()
        );
        response.json()["data"]["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }

    /// Seed an admin account directly in the store and log it in.
    pub async fn admin_token(&self) -> String {
        self.store
            .seed("admin", "admin@example.com", "admin-password", Role::Admin);
        self.login_token("admin", "admin-password").await
    }
}

fn json_request(
    method: Method,
    path: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("Failed to build request"),
        None => builder.body(Body::empty()).expect("Failed to build request"),
    }
}
