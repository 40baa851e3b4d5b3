use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::user::User;

/// Membership model - one user on one list.
///
/// Rows are only ever created by add_member and deleted by remove_member;
/// the (list_id, user_id) pair is unique, so a concurrent duplicate add
/// surfaces as a uniqueness violation rather than a second row.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Membership {
    pub id: Uuid,
    pub list_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    /// Whether a user is on a list
    pub async fn exists(list_id: Uuid, user_id: Uuid, pool: &PgPool) -> Result<bool> {
        let row: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM memberships WHERE list_id = $1 AND user_id = $2")
                .bind(list_id)
                .bind(user_id)
                .fetch_optional(pool)
                .await?;

        Ok(row.is_some())
    }

    /// Number of members on a list
    pub async fn count(list_id: Uuid, pool: &PgPool) -> Result<i64> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT count(*) FROM memberships WHERE list_id = $1")
                .bind(list_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// All users on a list, oldest membership first
    pub async fn members_of(list_id: Uuid, pool: &PgPool) -> Result<Vec<User>> {
        sqlx::query_as::<_, User>(
            "SELECT u.*
             FROM users u
             JOIN memberships m ON m.user_id = u.id
             WHERE m.list_id = $1
             ORDER BY m.created_at, u.email",
        )
        .bind(list_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
