//! Best-effort provider sync for list-level lifecycle events.
//!
//! Distinct from the strict membership path on purpose: list metadata sync
//! is administrative and self-healing on the next full sync, so failures
//! here are logged and the local record stays authoritative.

use anyhow::Result;
use tracing::{error, info};

use crate::domains::lists::models::list::List;
use crate::domains::lists::models::membership::Membership;
use crate::kernel::{ListFieldUpdate, ServerDeps};

/// Mirror a newly created list at the provider and import any members
/// already on the roster.
pub async fn on_list_created(list: &List, deps: &ServerDeps) -> Result<()> {
    let address = match deps
        .provider
        .create_list(&list.name, &list.description)
        .await
    {
        Ok(address) => address,
        Err(e) => {
            error!(
                list = %list.name,
                error = %e,
                "provider list creation failed, list stays local-only"
            );
            return Ok(());
        }
    };

    List::set_external_address(list.id, &address, &deps.db_pool).await?;
    info!(list = %list.name, external_address = %address, "provider list created");

    // Import the existing roster. Individual failures are logged and do not
    // stop the remaining imports.
    for user in Membership::members_of(list.id, &deps.db_pool).await? {
        if let Err(e) = deps
            .provider
            .add_member(&address, &user.email, &user.display_name)
            .await
        {
            error!(
                list = %list.name,
                member = %user.email,
                error = %e,
                "failed to import member into provider list"
            );
        }
    }

    Ok(())
}

/// Push name/description edits to the provider.
///
/// Skips unmirrored and inactive lists, and does nothing when neither
/// field actually changed.
pub async fn on_list_updated(list: &List, changes: &ListFieldUpdate, deps: &ServerDeps) {
    let address = match &list.external_address {
        Some(address) => address,
        None => return,
    };
    if !list.active || changes.is_empty() {
        return;
    }

    if let Err(e) = deps.provider.update_list(address, changes).await {
        error!(list = %list.name, error = %e, "provider list update failed");
    }
}

/// Delete the provider copy of a list, best-effort.
pub async fn on_list_deleted(list: &List, deps: &ServerDeps) {
    let address = match &list.external_address {
        Some(address) => address,
        None => return,
    };

    if let Err(e) = deps.provider.delete_list(address).await {
        error!(list = %list.name, error = %e, "provider list deletion failed");
    }
}
