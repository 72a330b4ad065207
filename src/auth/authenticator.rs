use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use tracing::warn;

use crate::{
    auth::password::{generate_password, hash_password, verify_password},
    error::AppError,
    users::repo::UserRepository,
};

type Verifier = fn(&str, &str) -> anyhow::Result<bool>;

lazy_static! {
    /// Compared against when the email is unknown so that every failed login
    /// pays one argon2 verification.
    static ref DUMMY_HASH: String = hash_password(&generate_password()).unwrap_or_default();
}

/// Credential check used by login. Fails with `AppError::AuthenticationFailed`
/// when the pair does not match a stored user.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, password: &str) -> Result<(), AppError>;
}

/// Checks a plaintext password against the stored argon2 hash.
pub struct PasswordAuthenticator {
    users: Arc<dyn UserRepository>,
    verify: Verifier,
}

impl PasswordAuthenticator {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self {
            users,
            verify: verify_password,
        }
    }

    #[cfg(test)]
    fn with_verifier(users: Arc<dyn UserRepository>, verify: Verifier) -> Self {
        Self { users, verify }
    }

    fn burn_dummy_verification(&self, password: &str) {
        let _ = (self.verify)(password, &DUMMY_HASH);
    }
}

#[async_trait]
impl Authenticator for PasswordAuthenticator {
    async fn authenticate(&self, email: &str, password: &str) -> Result<(), AppError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            self.burn_dummy_verification(password);
            warn!(email = %email, "login unknown email");
            return Err(AppError::AuthenticationFailed);
        };

        match (self.verify)(password, &user.password_hash) {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(email = %email, user_id = %user.id, "login invalid password");
                Err(AppError::AuthenticationFailed)
            }
            Err(e) => {
                self.burn_dummy_verification(password);
                warn!(error = %e, user_id = %user.id, "stored hash unusable");
                Err(AppError::AuthenticationFailed)
            }
        }
    }
}
