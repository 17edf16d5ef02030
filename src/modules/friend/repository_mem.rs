use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{RelationChange, Relations},
            repository::FriendRepository,
        },
        user::repository_mem::UserRepositoryMem,
    },
};

#[async_trait::async_trait]
impl FriendRepository for UserRepositoryMem {
    async fn add_friend_request(&self, to: &Uuid, from: &Uuid) -> Result<bool, error::SystemError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == *to)
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        if user.has_request_from(from) || user.is_friend_of(from) {
            return Ok(false);
        }

        user.friend_requests.push(*from);
        user.updated_at = chrono::Utc::now();
        Ok(true)
    }

    async fn apply_relation(&self, change: &RelationChange) -> Result<(), error::SystemError> {
        let mut users = self.users.write().await;

        let find = |id: Uuid| {
            users
                .iter()
                .find(|u| u.id == id)
                .map(Relations::from)
                .ok_or_else(|| error::SystemError::not_found("User not found"))
        };
        let mut owner = find(change.owner)?;
        let mut requester = find(change.requester)?;

        change.apply(&mut owner, &mut requester)?;

        let now = chrono::Utc::now();
        for relations in [owner, requester] {
            if let Some(user) = users.iter_mut().find(|u| u.id == relations.id) {
                user.friends = relations.friends;
                user.friend_requests = relations.friend_requests;
                user.updated_at = now;
            }
        }

        Ok(())
    }
}
