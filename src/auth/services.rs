use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    auth::{
        authenticator::Authenticator,
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        jwt::JwtKeys,
        password::hash_password,
    },
    error::AppError,
    users::{
        dto::UserView,
        mapper::to_view,
        repo::UserRepository,
        repo_types::{NewUser, User},
    },
    validation::{normalize_email, validate_email, validate_password, validate_username},
};

/// Registration, login and token refresh.
#[derive(Clone)]
pub struct AuthService {
    authenticator: Arc<dyn Authenticator>,
    users: Arc<dyn UserRepository>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        users: Arc<dyn UserRepository>,
        keys: JwtKeys,
    ) -> Self {
        Self {
            authenticator,
            users,
            keys,
        }
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User, AppError> {
        let email = normalize_email(&request.email);
        validate_email(&email)?;
        validate_username(&request.username)?;
        validate_password(&request.password)?;

        let hash = hash_password(&request.password)?;
        let user = self
            .users
            .save(NewUser::new(request.username.trim().to_owned(), email, hash))
            .await
            .map_err(|e| {
                warn!(error = %e, "register failed");
                AppError::from(e)
            })?;

        info!(user_id = %user.id, email = %user.email, "user registered");
        Ok(user)
    }

    pub async fn authenticate(&self, request: LoginRequest) -> Result<AuthResponse, AppError> {
        let email = normalize_email(&request.email);
        self.authenticator
            .authenticate(&email, &request.password)
            .await?;

        let Some(user) = self.users.find_by_email(&email).await? else {
            error!(email = %email, "authenticated user not found in store");
            return Err(AppError::UserMissing(email));
        };

        let response = self.issue_pair(&user.email)?;
        info!(user_id = %user.id, email = %user.email, "user logged in");
        Ok(response)
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthResponse, AppError> {
        let claims = self.keys.verify_refresh(refresh_token).map_err(|e| {
            warn!(error = %e, "refresh rejected");
            AppError::Unauthorized("Invalid or expired refresh token".into())
        })?;

        if self.users.find_by_email(&claims.sub).await?.is_none() {
            warn!(email = %claims.sub, "refresh for unknown user");
            return Err(AppError::Unauthorized("User not found".into()));
        }

        self.issue_pair(&claims.sub)
    }

    /// Resolves the subject of an access token to its user.
    pub async fn current_user(&self, email: &str) -> Result<UserView, AppError> {
        self.users
            .find_by_email(email)
            .await?
            .map(|u| to_view(&u))
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    fn issue_pair(&self, email: &str) -> Result<AuthResponse, AppError> {
        let token = self.keys.issue(email).map_err(|e| {
            error!(error = %e, "jwt sign access failed");
            AppError::Internal(e)
        })?;
        let refresh_token = self.keys.issue_refresh(email).map_err(|e| {
            error!(error = %e, "jwt sign refresh failed");
            AppError::Internal(e)
        })?;
        Ok(AuthResponse {
            token,
            refresh_token,
        })
    }
}
