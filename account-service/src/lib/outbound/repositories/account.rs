use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Role;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountStore;

/// PostgreSQL implementation of the account store.
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Decode a database row into the aggregate.
///
/// Stored values failing domain validation mean corrupt data; they surface
/// as database errors, never as user-facing validation failures.
fn account_from_row(row: &PgRow) -> Result<Account, AccountError> {
    let username: String = row
        .try_get("username")
        .map_err(|e| AccountError::Database(e.to_string()))?;
    let email: String = row
        .try_get("email")
        .map_err(|e| AccountError::Database(e.to_string()))?;
    let display_name: String = row
        .try_get("display_name")
        .map_err(|e| AccountError::Database(e.to_string()))?;
    let role: String = row
        .try_get("role")
        .map_err(|e| AccountError::Database(e.to_string()))?;

    Ok(Account {
        id: AccountId(
            row.try_get("id")
                .map_err(|e| AccountError::Database(e.to_string()))?,
        ),
        username: Username::new(username)
            .map_err(|e| AccountError::Database(format!("Stored username invalid: {}", e)))?,
        email: EmailAddress::new(email)
            .map_err(|e| AccountError::Database(format!("Stored email invalid: {}", e)))?,
        secret_hash: row
            .try_get("secret_hash")
            .map_err(|e| AccountError::Database(e.to_string()))?,
        display_name: DisplayName::new(display_name)
            .map_err(|e| AccountError::Database(format!("Stored display name invalid: {}", e)))?,
        role: role
            .parse::<Role>()
            .map_err(|e| AccountError::Database(format!("Stored role invalid: {}", e)))?,
        active: row
            .try_get("active")
            .map_err(|e| AccountError::Database(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| AccountError::Database(e.to_string()))?,
    })
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, secret_hash, display_name, role, active, created_at
            FROM accounts
            WHERE active = TRUE AND (username = $1 OR email = $1)
            LIMIT 1
            "#,
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, secret_hash, display_name, role, active, created_at
            FROM accounts
            WHERE active = TRUE AND id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError> {
        // Uniqueness spans active and inactive records alike.
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, AccountError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))
    }

    async fn insert(&self, account: NewAccount) -> Result<AccountId, AccountError> {
        let row = sqlx::query(
            r#"
            INSERT INTO accounts (username, email, secret_hash, display_name, role, active, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(&account.secret_hash)
        .bind(account.display_name.as_str())
        .bind(account.role.as_str())
        .bind(account.active)
        .bind(account.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("accounts_username_key") {
                        return AccountError::UsernameAlreadyExists(
                            account.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("accounts_email_key") {
                        return AccountError::EmailAlreadyExists(
                            account.email.as_str().to_string(),
                        );
                    }
                }
            }
            AccountError::Database(e.to_string())
        })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| AccountError::Database(e.to_string()))?;

        Ok(AccountId(id))
    }

    async fn update(&self, account: &Account) -> Result<u64, AccountError> {
        // Username is immutable after creation and deliberately absent here.
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = $2, secret_hash = $3, display_name = $4, role = $5, active = $6
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.secret_hash)
        .bind(account.display_name.as_str())
        .bind(account.role.as_str())
        .bind(account.active)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("accounts_email_key")
                {
                    return AccountError::EmailAlreadyExists(account.email.as_str().to_string());
                }
            }
            AccountError::Database(e.to_string())
        })?;

        Ok(result.rows_affected())
    }
}
