use std::sync::Arc;

use tracing::info;

use crate::{
    auth::password::{generate_password, hash_password},
    error::AppError,
    users::{
        dto::{CreateUserRequest, CreatedUser, UserView},
        mapper::to_view,
        repo::UserRepository,
        repo_types::NewUser,
    },
    validation::{normalize_email, validate_email, validate_password, validate_username},
};

/// Directory operations over stored users.
#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn UserRepository>,
}

impl UserDirectory {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn list_all(&self) -> Result<Vec<UserView>, AppError> {
        let users = self.users.find_all().await?;
        Ok(users.iter().map(to_view).collect())
    }

    /// Creates a user. Without a supplied password a random one is generated and
    /// returned once in `temporary_password`.
    pub async fn create(&self, request: CreateUserRequest) -> Result<CreatedUser, AppError> {
        let email = normalize_email(&request.email);
        validate_email(&email)?;
        validate_username(&request.username)?;

        let (password, temporary_password) = match request.password {
            Some(p) => {
                validate_password(&p)?;
                (p, None)
            }
            None => {
                let generated = generate_password();
                (generated.clone(), Some(generated))
            }
        };

        let hash = hash_password(&password)?;
        let user = self
            .users
            .save(NewUser::new(request.username.trim().to_owned(), email, hash))
            .await?;

        info!(
            user_id = %user.id,
            generated_password = temporary_password.is_some(),
            "directory user created"
        );
        Ok(CreatedUser {
            user: to_view(&user),
            temporary_password,
        })
    }
}
