use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{model::UserResponse, repository::UserRepository},
};

/// Read-only queries over the whole user set.
#[derive(Clone)]
pub struct DiscoveryService {
    user_repo: Arc<dyn UserRepository + Send + Sync>,
}

impl DiscoveryService {
    pub fn with_dependencies(user_repo: Arc<dyn UserRepository + Send + Sync>) -> Self {
        info!("DiscoveryService initialized with dependencies");
        DiscoveryService { user_repo }
    }

    pub async fn list_all(&self) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    pub async fn search(&self, query: &str) -> Result<Vec<UserResponse>, error::SystemError> {
        let users = self.user_repo.search_users(query).await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Everyone the owner is not yet connected to: no friendship and no pending
    /// request in either direction.
    pub async fn recommend(&self, owner_id: Uuid) -> Result<Vec<UserResponse>, error::SystemError> {
        let (owner, users) =
            tokio::try_join!(self.user_repo.find_by_id(&owner_id), self.user_repo.find_all())?;
        let owner = owner.ok_or_else(|| error::SystemError::not_found("User not found"))?;

        Ok(users
            .into_iter()
            .filter(|u| {
                u.id != owner.id
                    && !owner.is_friend_of(&u.id)
                    && !owner.has_request_from(&u.id)
                    && !u.has_request_from(&owner.id)
            })
            .map(UserResponse::from)
            .collect())
    }
}
