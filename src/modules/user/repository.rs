use uuid::Uuid;

use crate::{api::error, modules::user::model::InsertUser, modules::user::schema::UserEntity};

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, error::SystemError>;

    /// Loads the given users, preserving the order of `ids`. Unknown ids are skipped.
    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<UserEntity>, error::SystemError>;
    async fn find_all(&self) -> Result<Vec<UserEntity>, error::SystemError>;
    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError>;

    /// Search users by first name, last name or username (case-insensitive, partial match)
    async fn search_users(&self, query: &str) -> Result<Vec<UserEntity>, error::SystemError>;
}
