use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::AuthSession;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::UpdateProfileCommand;

/// Port for account operations exposed to the HTTP layer: registration,
/// login, and profile maintenance for authenticated callers.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Registration data with already validated fields
    ///
    /// # Returns
    /// The public projection of the stored account
    ///
    /// # Errors
    /// * `AccountError::UsernameAlreadyExists` - Username is taken
    /// * `AccountError::EmailAlreadyExists` - Email is taken
    async fn register(
        &self,
        command: RegisterAccountCommand,
    ) -> Result<AccountProfile, AccountError>;

    /// Authenticate by username or email and issue a bearer token.
    ///
    /// # Errors
    /// * `AccountError::Validation` - A field is blank
    /// * `AccountError::InvalidCredentials` - Authentication failed, with
    ///   no distinction between the possible causes
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AccountError>;

    /// Fetch the current profile for an account id.
    ///
    /// Reads the store rather than trusting claims, so deactivation is
    /// visible immediately.
    ///
    /// # Errors
    /// * `AccountError::NotFound` - No active account under this id
    async fn get_profile(&self, id: AccountId) -> Result<AccountProfile, AccountError>;

    /// Apply a partial profile update and return the new profile.
    ///
    /// # Errors
    /// * `AccountError::Validation` - Password pair incomplete, wrong
    ///   current password, or nothing to change
    /// * `AccountError::EmailAlreadyExists` - New email is taken
    /// * `AccountError::NotFound` - No active account under this id
    async fn update_profile(
        &self,
        id: AccountId,
        command: UpdateProfileCommand,
    ) -> Result<AccountProfile, AccountError>;

    /// Deactivate an account, ending its ability to log in.
    ///
    /// # Errors
    /// * `AccountError::NotFound` - No active account under this id,
    ///   including one already deactivated
    async fn deactivate(&self, id: AccountId) -> Result<(), AccountError>;
}

/// Persistence port for account records.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Find an active account whose username or email equals `identifier`.
    ///
    /// Inactive records are never returned.
    async fn find_by_username_or_email(
        &self,
        identifier: &str,
    ) -> Result<Option<Account>, AccountError>;

    /// Find an active account by id. Inactive records are never returned.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountError>;

    /// Whether any record, active or inactive, holds this username.
    async fn exists_by_username(&self, username: &str) -> Result<bool, AccountError>;

    /// Whether any record, active or inactive, holds this email.
    async fn exists_by_email(&self, email: &str) -> Result<bool, AccountError>;

    /// Insert a new account and return its assigned id.
    ///
    /// # Errors
    /// * `AccountError::UsernameAlreadyExists` - Unique constraint hit
    /// * `AccountError::EmailAlreadyExists` - Unique constraint hit
    async fn insert(&self, account: NewAccount) -> Result<AccountId, AccountError>;

    /// Persist the mutable fields of an account by id.
    ///
    /// # Returns
    /// The number of rows affected; zero means the id does not exist.
    async fn update(&self, account: &Account) -> Result<u64, AccountError>;
}
