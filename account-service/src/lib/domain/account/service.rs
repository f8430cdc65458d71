use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordHasher;
use auth::TokenService;
use auth::TokenSubject;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::AuthSession;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::Role;
use crate::domain::account::models::UpdateProfileCommand;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::account::ports::AccountStore;

/// Domain service implementation for account operations.
///
/// Orchestrates the credential store, the password hasher, and the token
/// service. Holds no mutable state of its own: configuration is fixed at
/// construction and every request is independent.
pub struct AccountService<S>
where
    S: AccountStore,
{
    store: Arc<S>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
}

impl<S> AccountService<S>
where
    S: AccountStore,
{
    pub fn new(store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self {
            store,
            tokens,
            hasher: PasswordHasher::new(),
        }
    }

    /// Hash a secret off the async runtime.
    ///
    /// Argon2 is deliberately slow, so it runs on the blocking pool
    /// instead of stalling request-serving threads.
    async fn hash_secret(&self, password: Password) -> Result<String, AccountError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|e| AccountError::Internal(format!("Hashing task failed: {}", e)))?
            .map_err(|e| AccountError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a secret against a stored hash off the async runtime.
    async fn verify_secret(
        &self,
        password: String,
        secret_hash: String,
    ) -> Result<bool, AccountError> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &secret_hash))
            .await
            .map_err(|e| AccountError::Internal(format!("Hashing task failed: {}", e)))
    }

    fn issue_session(&self, account: &Account) -> Result<AuthSession, AccountError> {
        let issued = self
            .tokens
            .issue(&TokenSubject {
                id: account.id.0,
                username: account.username.as_str().to_string(),
                display_name: account.display_name.as_str().to_string(),
                role: account.role.to_string(),
            })
            .map_err(|e| AccountError::Internal(format!("Token issuance failed: {}", e)))?;

        Ok(AuthSession {
            token: issued.token,
            expires_at: issued.expires_at,
            account: AccountProfile::from(account),
        })
    }
}

#[async_trait]
impl<S> AccountServicePort for AccountService<S>
where
    S: AccountStore,
{
    async fn register(
        &self,
        command: RegisterAccountCommand,
    ) -> Result<AccountProfile, AccountError> {
        // Advisory pre-checks for friendly conflict errors. The store's
        // unique constraints remain the authoritative guard against
        // concurrent duplicates.
        if self
            .store
            .exists_by_username(command.username.as_str())
            .await?
        {
            return Err(AccountError::UsernameAlreadyExists(
                command.username.as_str().to_string(),
            ));
        }
        if self.store.exists_by_email(command.email.as_str()).await? {
            return Err(AccountError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let secret_hash = self.hash_secret(command.password).await?;

        let account = NewAccount {
            username: command.username,
            email: command.email,
            secret_hash,
            display_name: command.display_name,
            role: Role::User,
            active: true,
            created_at: Utc::now(),
        };
        let id = self.store.insert(account.clone()).await?;

        tracing::info!(account_id = %id, "Account registered");

        Ok(AccountProfile {
            id,
            username: account.username.as_str().to_string(),
            email: account.email.as_str().to_string(),
            display_name: account.display_name.as_str().to_string(),
            role: account.role,
            created_at: account.created_at,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AccountError> {
        let identifier = command.identifier.trim();
        if identifier.is_empty() {
            return Err(AccountError::Validation(
                "Username or email must not be blank".to_string(),
            ));
        }
        if command.password.is_empty() {
            return Err(AccountError::Validation(
                "Password must not be blank".to_string(),
            ));
        }

        // Unknown identifier, wrong password, and deactivated account all
        // answer identically: the response never confirms whether an
        // account exists.
        let account = self
            .store
            .find_by_username_or_email(identifier)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let verified = self
            .verify_secret(command.password, account.secret_hash.clone())
            .await?;
        if !verified {
            return Err(AccountError::InvalidCredentials);
        }

        // Lookups surface active records only; an inactive one is still
        // rejected here.
        if !account.active {
            return Err(AccountError::InvalidCredentials);
        }

        self.issue_session(&account)
    }

    async fn get_profile(&self, id: AccountId) -> Result<AccountProfile, AccountError> {
        self.store
            .find_by_id(id)
            .await?
            .map(|account| AccountProfile::from(&account))
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    async fn update_profile(
        &self,
        id: AccountId,
        command: UpdateProfileCommand,
    ) -> Result<AccountProfile, AccountError> {
        let mut account = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        let mut changed = false;

        if let Some(display_name) = command.display_name {
            if display_name != account.display_name {
                account.display_name = display_name;
                changed = true;
            }
        }

        if let Some(email) = command.email {
            if email != account.email {
                // Any hit for an address other than the caller's own
                // necessarily belongs to another account.
                if self.store.exists_by_email(email.as_str()).await? {
                    return Err(AccountError::EmailAlreadyExists(
                        email.as_str().to_string(),
                    ));
                }
                account.email = email;
                changed = true;
            }
        }

        match (command.current_password, command.new_password) {
            (None, None) => {}
            (Some(current), Some(new)) => {
                let verified = self
                    .verify_secret(current, account.secret_hash.clone())
                    .await?;
                if !verified {
                    return Err(AccountError::Validation(
                        "Current password is incorrect".to_string(),
                    ));
                }
                account.secret_hash = self.hash_secret(new).await?;
                changed = true;
            }
            _ => {
                return Err(AccountError::Validation(
                    "Current and new password must be provided together".to_string(),
                ));
            }
        }

        if !changed {
            return Err(AccountError::Validation("no changes".to_string()));
        }

        let rows = self.store.update(&account).await?;
        if rows == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(AccountProfile::from(&account))
    }

    async fn deactivate(&self, id: AccountId) -> Result<(), AccountError> {
        let mut account = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))?;

        account.active = false;
        let rows = self.store.update(&account).await?;
        if rows == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        tracing::info!(account_id = %id, "Account deactivated");

        Ok(())
    }
}
