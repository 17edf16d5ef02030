use uuid::Uuid;

use crate::{
    api::error,
    modules::friend::{
        model::{RelationChange, Relations},
        repository::FriendRepository,
    },
};

#[derive(Clone)]
pub struct FriendRepositoryPg {
    pool: sqlx::PgPool,
}

impl FriendRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FriendRepository for FriendRepositoryPg {
    async fn add_friend_request(&self, to: &Uuid, from: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query(
            r#"
            UPDATE users
            SET friend_requests = array_append(friend_requests, $2),
                updated_at = NOW()
            WHERE id = $1
              AND NOT ($2 = ANY(friend_requests))
              AND NOT ($2 = ANY(friends))
            "#,
        )
        .bind(to)
        .bind(from)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows > 0)
    }

    async fn apply_relation(&self, change: &RelationChange) -> Result<(), error::SystemError> {
        let mut tx = self.pool.begin().await?;

        // Lock both rows in id order so opposite resolves cannot deadlock.
        let rows = sqlx::query_as::<_, Relations>(
            r#"
            SELECT id, friends, friend_requests
            FROM users
            WHERE id = ANY($1)
            ORDER BY id
            FOR UPDATE
            "#,
        )
        .bind(vec![change.owner, change.requester])
        .fetch_all(&mut *tx)
        .await?;

        let find = |id: Uuid| {
            rows.iter()
                .find(|r| r.id == id)
                .cloned()
                .ok_or_else(|| error::SystemError::not_found("User not found"))
        };
        let mut owner = find(change.owner)?;
        let mut requester = find(change.requester)?;

        if let Err(e) = change.apply(&mut owner, &mut requester) {
            tx.rollback().await?;
            return Err(e);
        }

        for relations in [&owner, &requester] {
            sqlx::query(
                r#"
                UPDATE users
                SET friends = $2, friend_requests = $3, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(relations.id)
            .bind(&relations.friends)
            .bind(&relations.friend_requests)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
