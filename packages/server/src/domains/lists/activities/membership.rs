//! Strict membership sync: the local roster and the provider roster move
//! together or not at all.
//!
//! This path is deliberately stricter than the list-level sync in
//! `provider_sync`: a membership change is a user-facing, individually
//! retryable action, so silent divergence between the two rosters is not
//! acceptable.

use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::domains::lists::models::list::List;
use crate::domains::lists::models::user::User;
use crate::kernel::ServerDeps;

/// Failure of a membership change. Provider rejections roll the local
/// write back, so the caller never observes partial state.
#[derive(Debug, Error)]
pub enum MembershipSyncError {
    #[error("list provider rejected the membership change: {0}")]
    Provider(anyhow::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Add a user to a list.
///
/// Returns false when the user is already a member (no-op, not an error).
/// The membership row and the provider-side add commit together.
pub async fn add_member(
    list: &List,
    user: &User,
    deps: &ServerDeps,
) -> Result<bool, MembershipSyncError> {
    let pool = &deps.db_pool;

    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM memberships WHERE list_id = $1 AND user_id = $2")
            .bind(list.id)
            .bind(user.id)
            .fetch_optional(pool)
            .await?;
    if existing.is_some() {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO memberships (list_id, user_id) VALUES ($1, $2)")
        .bind(list.id)
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

    // The provider call happens while the transaction is open: a rejected
    // change rolls the row above back.
    if let Some(address) = &list.external_address {
        if let Err(e) = deps
            .provider
            .add_member(address, &user.email, &user.display_name)
            .await
        {
            tx.rollback().await?;
            return Err(MembershipSyncError::Provider(e));
        }
    }

    tx.commit().await?;

    info!(list = %list.name, member = %user.email, "member added");
    Ok(true)
}

/// Remove a user from a list.
///
/// Returns false when the user is not a member (no-op, not an error).
/// The row delete and the provider-side remove commit together.
pub async fn remove_member(
    list: &List,
    user: &User,
    deps: &ServerDeps,
) -> Result<bool, MembershipSyncError> {
    let pool = &deps.db_pool;

    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM memberships WHERE list_id = $1 AND user_id = $2")
            .bind(list.id)
            .bind(user.id)
            .fetch_optional(pool)
            .await?;
    if existing.is_none() {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM memberships WHERE list_id = $1 AND user_id = $2")
        .bind(list.id)
        .bind(user.id)
        .execute(&mut *tx)
        .await?;

    if let Some(address) = &list.external_address {
        if let Err(e) = deps.provider.remove_member(address, &user.email).await {
            tx.rollback().await?;
            return Err(MembershipSyncError::Provider(e));
        }
    }

    tx.commit().await?;

    info!(list = %list.name, member = %user.email, "member removed");
    Ok(true)
}
