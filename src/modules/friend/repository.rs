use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::RelationChange;

#[async_trait::async_trait]
pub trait FriendRepository {
    /// Appends `from` to the pending requests of `to`. Returns `false` when `from` is
    /// already pending or already a friend of `to`.
    async fn add_friend_request(&self, to: &Uuid, from: &Uuid) -> Result<bool, error::SystemError>;

    /// Resolves a pending request, writing owner and requester as one unit.
    async fn apply_relation(&self, change: &RelationChange) -> Result<(), error::SystemError>;
}
