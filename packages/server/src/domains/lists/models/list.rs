use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::ListAddressConfig;

/// List model - a mailing list with a local roster and, once the provider
/// has confirmed creation, a mirrored hosted list.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct List {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub active: bool,
    /// Provider-assigned address; None until the provider confirms creation.
    pub external_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl List {
    /// Whether a name is usable as a list name: lowercase letters, digits,
    /// hyphen and underscore only.
    pub fn valid_name(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    }

    /// The address mail for this list is sent to: the provider address when
    /// mirrored, the relay subdomain address otherwise.
    pub fn email_address(&self, cfg: &ListAddressConfig) -> String {
        match &self.external_address {
            Some(address) => address.clone(),
            None => cfg.address_for(&self.name),
        }
    }

    /// Insert a new list (active, not yet mirrored)
    pub async fn insert(name: &str, description: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO lists (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Find list by ID
    pub async fn find_by_id(id: Uuid, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>("SELECT * FROM lists WHERE id = $1")
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(Into::into)
    }

    /// Find an active list by name (the inbound routing lookup)
    pub async fn find_active_by_name(name: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM lists WHERE name = $1 AND active = true")
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Store the provider-assigned address once the provider confirms creation
    pub async fn set_external_address(id: Uuid, address: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE lists SET external_address = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(address)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Update name and description
    pub async fn update_fields(
        id: Uuid,
        name: &str,
        description: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE lists SET name = $2, description = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a list. Membership rows go with it (ON DELETE CASCADE).
    pub async fn delete(id: Uuid, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
