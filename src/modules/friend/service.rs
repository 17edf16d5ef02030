use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{FriendResponse, RelationChange, RequestAction},
            repository::FriendRepository,
        },
        user::{model::UserResponse, repository::UserRepository, schema::UserEntity},
    },
};

#[derive(Clone)]
pub struct FriendService {
    friend_repo: Arc<dyn FriendRepository + Send + Sync>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
}

impl FriendService {
    pub fn with_dependencies(
        friend_repo: Arc<dyn FriendRepository + Send + Sync>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        info!("FriendService initialized with dependencies");
        FriendService { friend_repo, user_repo }
    }

    async fn require_user(&self, id: &Uuid) -> Result<UserEntity, error::SystemError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))
    }

    pub async fn send_friend_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if sender_id == receiver_id {
            return Err(error::SystemError::invalid_state("Cannot send friend request to yourself"));
        }

        let receiver = self.require_user(&receiver_id).await?;

        if receiver.is_friend_of(&sender_id) {
            return Err(error::SystemError::conflict("Already friends"));
        }
        if receiver.has_request_from(&sender_id) {
            return Err(error::SystemError::conflict("Request already sent"));
        }

        if !self.friend_repo.add_friend_request(&receiver_id, &sender_id).await? {
            return Err(error::SystemError::conflict("Request already sent"));
        }

        info!("Friend request {} -> {} sent", sender_id, receiver_id);
        Ok(())
    }

    pub async fn handle_friend_request(
        &self,
        owner_id: Uuid,
        from_user_id: Uuid,
        action: RequestAction,
    ) -> Result<(), error::SystemError> {
        self.require_user(&from_user_id).await?;
        let owner = self.require_user(&owner_id).await?;

        if !owner.has_request_from(&from_user_id) {
            return Err(error::SystemError::invalid_state("No such friend request"));
        }

        let change = RelationChange { owner: owner_id, requester: from_user_id, action };
        self.friend_repo.apply_relation(&change).await?;

        info!("Friend request {} -> {} {}", from_user_id, owner_id, action);
        Ok(())
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        let user = self.require_user(&user_id).await?;
        let friends = self.user_repo.find_many(&user.friends).await?;
        Ok(friends.into_iter().map(FriendResponse::from).collect())
    }

    pub async fn get_pending_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserResponse>, error::SystemError> {
        let user = self.require_user(&user_id).await?;
        let requesters = self.user_repo.find_many(&user.friend_requests).await?;
        Ok(requesters.into_iter().map(UserResponse::from).collect())
    }
}
