use std::fmt;

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::{api::error, modules::user::schema::UserEntity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendResponse {
    pub id: Uuid,
    pub display_name: String,
    pub username: String,
}

impl From<UserEntity> for FriendResponse {
    fn from(user: UserEntity) -> Self {
        FriendResponse { id: user.id, display_name: user.display_name(), username: user.username }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendRequestBody {
    pub to_user_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestAction {
    Accept,
    Reject,
}

impl fmt::Display for RequestAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestAction::Accept => f.write_str("accepted"),
            RequestAction::Reject => f.write_str("rejected"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HandleRequestBody {
    pub from_user_id: Uuid,
    pub action: RequestAction,
}

/// The friend and pending-request lists of one user.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct Relations {
    pub id: Uuid,
    pub friends: Vec<Uuid>,
    pub friend_requests: Vec<Uuid>,
}

impl From<&UserEntity> for Relations {
    fn from(user: &UserEntity) -> Self {
        Relations {
            id: user.id,
            friends: user.friends.clone(),
            friend_requests: user.friend_requests.clone(),
        }
    }
}

/// Resolution of the pending request `requester -> owner`.
#[derive(Debug, Clone, Copy)]
pub struct RelationChange {
    pub owner: Uuid,
    pub requester: Uuid,
    pub action: RequestAction,
}

fn push_unique(ids: &mut Vec<Uuid>, id: Uuid) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}

impl RelationChange {
    /// Applies the change to both sides. Stores call this while holding both records,
    /// so the pair is written together or not at all.
    pub fn apply(
        &self,
        owner: &mut Relations,
        requester: &mut Relations,
    ) -> Result<(), error::SystemError> {
        if !owner.friend_requests.contains(&self.requester) {
            return Err(error::SystemError::invalid_state("No such friend request"));
        }

        owner.friend_requests.retain(|id| *id != self.requester);

        if self.action == RequestAction::Accept {
            // An opposite-direction request is settled by the same accept.
            requester.friend_requests.retain(|id| *id != self.owner);
            push_unique(&mut owner.friends, self.requester);
            push_unique(&mut requester.friends, self.owner);
        }

        Ok(())
    }
}
