use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::constants::TOKEN_EXPIRATION;
use crate::modules::user::model::{AuthResponse, LoginModel, RegisterModel, UserResponse};
use crate::modules::user::schema::UserEntity;
use crate::modules::user::{model::InsertUser, repository::UserRepository};
use crate::utils::{hash_password, verify_password, Claims};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    jwt_secret: Arc<str>,
}

impl UserService {
    pub fn with_dependencies(
        repo: Arc<dyn UserRepository + Send + Sync>,
        jwt_secret: impl Into<Arc<str>>,
    ) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, jwt_secret: jwt_secret.into() }
    }

    fn issue_token(&self, id: &Uuid) -> Result<String, error::SystemError> {
        Claims::new(id, TOKEN_EXPIRATION).encode(self.jwt_secret.as_bytes())
    }

    pub async fn register(&self, user: RegisterModel) -> Result<AuthResponse, error::SystemError> {
        if self.repo.find_by_email(&user.email).await?.is_some() {
            return Err(error::SystemError::conflict("Email already exists"));
        }
        if self.repo.find_by_username(&user.username).await?.is_some() {
            return Err(error::SystemError::conflict("Username already exists"));
        }

        let hash_password = hash_password(&user.password)?;

        let new_user = InsertUser {
            first_name: user.fullname.firstname,
            last_name: user.fullname.lastname,
            username: user.username,
            email: user.email,
            hash_password,
            gender: user.gender,
        };

        let entity = self.repo.create(&new_user).await?;
        let token = self.issue_token(&entity.id)?;
        info!("User {} registered", entity.id);

        Ok(AuthResponse { user: UserResponse::from(entity), token })
    }

    pub async fn login(&self, user: LoginModel) -> Result<AuthResponse, error::SystemError> {
        let entity = self
            .repo
            .find_by_email(&user.email)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        if !verify_password(&entity.hash_password, &user.password)? {
            warn!("Failed login attempt for user {}", entity.id);
            return Err(error::SystemError::InvalidCredentials);
        }

        let token = self.issue_token(&entity.id)?;
        Ok(AuthResponse { user: UserResponse::from(entity), token })
    }

    /// Resolves a bearer token to the account it was issued for.
    pub async fn authenticate(&self, token: &str) -> Result<UserEntity, error::SystemError> {
        let claims = Claims::decode(token, self.jwt_secret.as_bytes()).map_err(|e| {
            warn!("Rejected token: {e:?}");
            error::SystemError::unauthorized("Invalid token")
        })?;

        self.repo
            .find_by_id(&claims.sub)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }
}
