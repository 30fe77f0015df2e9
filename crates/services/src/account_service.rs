use std::sync::{Arc, LazyLock};

use quest_core::model::{User, UserId};
use storage::repository::{NewUserRecord, StorageError, UserRepository};
use tracing::{debug, info};

use crate::Clock;
use crate::error::AccountError;
use crate::forms::{Field, FieldErrors, LoginForm, MSG_USERNAME_TAKEN, RegisterForm};
use crate::password::{hash_password, verify_password};

/// Verified against when a login names an unknown user, so both failure
/// paths cost one Argon2 verification.
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("quest-dummy-password").unwrap_or_default());

/// Registration, login and user lookup.
#[derive(Clone)]
pub struct AccountService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    #[must_use]
    pub fn new(clock: Clock, users: Arc<dyn UserRepository>) -> Self {
        Self { clock, users }
    }

    /// Validate the form and create the account. The new user is not logged in.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Invalid` with field messages when the form is
    /// rejected, including a username claimed concurrently between validation
    /// and insert. Returns `AccountError::Storage` or `AccountError::Hashing`
    /// for infrastructure failures.
    pub async fn register(&self, form: &RegisterForm) -> Result<UserId, AccountError> {
        form.validate(self.users.as_ref()).await?;

        let password = form.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AccountError::Hashing(e.to_string()))?
            .map_err(AccountError::Hashing)?;

        let record = NewUserRecord {
            username: form.username.clone(),
            password_hash,
            created_at: self.clock.now(),
        };
        match self.users.insert_user(record).await {
            Ok(user_id) => {
                info!(%user_id, username = %form.username, "registered user");
                Ok(user_id)
            }
            Err(StorageError::Conflict) => Err(AccountError::Invalid(FieldErrors::single(
                Field::Username,
                MSG_USERNAME_TAKEN,
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// Check credentials and return the matching user.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Invalid` when a field is missing and
    /// `AccountError::BadCredentials` for an unknown user or wrong password;
    /// the two credential failures are not distinguishable by the caller.
    pub async fn authenticate(&self, form: &LoginForm) -> Result<User, AccountError> {
        form.validate().map_err(AccountError::Invalid)?;

        let user = self.users.find_by_username(&form.username).await?;
        let stored = user
            .as_ref()
            .map_or_else(|| DUMMY_HASH.clone(), |u| u.password_hash().to_owned());
        let password = form.password.clone();
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|e| AccountError::Hashing(e.to_string()))?;

        match user {
            Some(user) if verified => {
                info!(user_id = %user.id(), "login succeeded");
                Ok(user)
            }
            _ => {
                debug!("login rejected");
                Err(AccountError::BadCredentials)
            }
        }
    }

    /// Fetch a user by id. Returns `Ok(None)` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::Storage` if repository access fails.
    pub async fn get_user(&self, user_id: UserId) -> Result<Option<User>, AccountError> {
        Ok(self.users.get_user(user_id).await?)
    }
}
