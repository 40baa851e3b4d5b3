//! Broadcast dispatch: provider-managed send-out for mirrored lists,
//! locally composed per-member delivery otherwise.

use anyhow::Result;
use tracing::info;

use crate::domains::lists::composer;
use crate::domains::lists::models::list::List;
use crate::domains::lists::models::membership::Membership;
use crate::kernel::ServerDeps;

/// How a broadcast went out.
#[derive(Debug, PartialEq, Eq)]
pub enum BroadcastDelivery {
    /// The provider performed the send-out to its own roster.
    Provider,
    /// The relay composed and delivered one message per member.
    Direct { recipients: usize },
}

/// Send a list-authored message to the whole roster.
pub async fn send_broadcast(
    list: &List,
    subject: &str,
    text_body: &str,
    html_body: &str,
    sender_display_name: &str,
    deps: &ServerDeps,
) -> Result<BroadcastDelivery> {
    if let Some(address) = &list.external_address {
        let tagged = composer::add_list_prefix(subject, &list.name);
        deps.provider
            .send_message(address, sender_display_name, &tagged, text_body, html_body)
            .await?;

        info!(list = %list.name, "broadcast handed to provider");
        return Ok(BroadcastDelivery::Provider);
    }

    let members = Membership::members_of(list.id, &deps.db_pool).await?;

    let mut recipients = 0;
    for member in &members {
        let outbound = composer::broadcast_email(
            member,
            list,
            subject,
            text_body,
            html_body,
            sender_display_name,
            &deps.list_config,
        );
        deps.mailer.deliver(&outbound).await?;
        recipients += 1;
    }

    info!(list = %list.name, recipients, "broadcast delivered directly");
    Ok(BroadcastDelivery::Direct { recipients })
}
