//! In-memory user store, used by tests and by local runs without PostgreSQL.

use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{model::InsertUser, repository::UserRepository, schema::UserEntity},
};

/// Users kept in registration order. Clones share the same records.
#[derive(Clone, Default)]
pub struct UserRepositoryMem {
    pub(crate) users: Arc<RwLock<Vec<UserEntity>>>,
}

impl UserRepositoryMem {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryMem {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, error::SystemError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<UserEntity>, error::SystemError> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.iter().find(|u| u.id == *id).cloned()).collect())
    }

    async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError> {
        Ok(self.users.read().await.clone())
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError> {
        let mut users = self.users.write().await;

        // Same guarantees as the unique constraints on the users table.
        if users.iter().any(|u| u.email == user.email) {
            return Err(error::SystemError::conflict("Email already exists"));
        }
        if users.iter().any(|u| u.username == user.username) {
            return Err(error::SystemError::conflict("Username already exists"));
        }

        let now = chrono::Utc::now();
        let entity = UserEntity {
            id: Uuid::new_v7(uuid::Timestamp::now(uuid::NoContext)),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            hash_password: user.hash_password.clone(),
            gender: user.gender,
            friends: Vec::new(),
            friend_requests: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        users.push(entity.clone());
        Ok(entity)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserEntity>, error::SystemError> {
        let needle = query.to_lowercase();
        let users = self.users.read().await;
        let mut found: Vec<UserEntity> = users
            .iter()
            .filter(|u| {
                u.first_name.to_lowercase().contains(&needle)
                    || u.last_name.to_lowercase().contains(&needle)
                    || u.username.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(found)
    }
}
