//! Administrative list lifecycle: create, update, delete.

use anyhow::{bail, Result};
use tracing::info;
use uuid::Uuid;

use crate::domains::lists::models::list::List;
use crate::kernel::{ListFieldUpdate, ServerDeps};

use super::provider_sync;

/// Create a mailing list and mirror it at the provider.
///
/// The local row is authoritative: provider failures during the mirror step
/// are logged by the sync hook and do not undo creation.
pub async fn create_list(name: &str, description: &str, deps: &ServerDeps) -> Result<List> {
    if !List::valid_name(name) {
        bail!(
            "invalid list name {:?}: only lowercase letters, digits, '-' and '_' are allowed",
            name
        );
    }
    if description.trim().is_empty() {
        bail!("list description must not be empty");
    }

    let list = List::insert(name, description, &deps.db_pool).await?;
    info!(list = %list.name, "list created");

    provider_sync::on_list_created(&list, deps).await?;

    // Re-read so the caller sees any stored external address.
    List::find_by_id(list.id, &deps.db_pool).await
}

/// Update a list's name and description, mirroring real changes to the
/// provider.
pub async fn update_list(
    list_id: Uuid,
    name: &str,
    description: &str,
    deps: &ServerDeps,
) -> Result<List> {
    if !List::valid_name(name) {
        bail!(
            "invalid list name {:?}: only lowercase letters, digits, '-' and '_' are allowed",
            name
        );
    }
    if description.trim().is_empty() {
        bail!("list description must not be empty");
    }

    let current = List::find_by_id(list_id, &deps.db_pool).await?;

    let changes = ListFieldUpdate {
        name: (name != current.name).then(|| name.to_string()),
        description: (description != current.description).then(|| description.to_string()),
    };

    let updated = List::update_fields(list_id, name, description, &deps.db_pool).await?;
    provider_sync::on_list_updated(&updated, &changes, deps).await;

    Ok(updated)
}

/// Delete a list. The provider copy is removed best-effort first; the
/// local row goes away regardless of the provider outcome.
pub async fn delete_list(list_id: Uuid, deps: &ServerDeps) -> Result<()> {
    let list = List::find_by_id(list_id, &deps.db_pool).await?;

    provider_sync::on_list_deleted(&list, deps).await;
    List::delete(list_id, &deps.db_pool).await?;

    info!(list = %list.name, "list deleted");
    Ok(())
}
