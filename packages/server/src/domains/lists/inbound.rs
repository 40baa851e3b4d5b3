//! Inbound relay: resolve the target list from the recipient address and
//! forward the message to every member except the sender.
//!
//! Unresolvable recipients and unknown or inactive lists are logged and
//! dropped so stale traffic never raises into the ingestion pipeline.

use anyhow::Result;
use thiserror::Error;
use tracing::{info, warn};

use crate::common::utils::addresses;
use crate::config::ListAddressConfig;
use crate::domains::lists::composer;
use crate::domains::lists::messages::InboundEmail;
use crate::domains::lists::models::list::List;
use crate::domains::lists::models::membership::Membership;
use crate::domains::lists::models::user::User;
use crate::kernel::{BaseMailer, ServerDeps};

/// Routing failures for traffic that should never have reached the relay.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("message has no recipient address")]
    NoRecipient,
    #[error("recipient domain {0:?} is not the list domain")]
    WrongDomain(String),
}

/// The address the message was actually sent to: first To, else first Cc,
/// else first Bcc, with any display name stripped.
pub fn resolve_recipient(message: &InboundEmail) -> Option<String> {
    message
        .to
        .first()
        .or_else(|| message.cc.first())
        .or_else(|| message.bcc.first())
        .map(|value| addresses::bare_address(value))
}

/// Relay one inbound message. Returns the number of members forwarded to.
///
/// A recipient outside the list domain violates the routing predicate and
/// is an error; everything else that cannot be routed is dropped quietly.
pub async fn handle_inbound(message: &InboundEmail, deps: &ServerDeps) -> Result<usize> {
    let recipient = match resolve_recipient(message) {
        Some(recipient) => recipient,
        None => {
            warn!(
                subject = %message.subject,
                error = %RoutingError::NoRecipient,
                "dropping inbound message"
            );
            return Ok(0);
        }
    };

    let list_domain = deps.list_config.fqdn();
    match addresses::domain_part(&recipient) {
        Some(domain) if domain.eq_ignore_ascii_case(&list_domain) => {}
        other => {
            return Err(RoutingError::WrongDomain(other.unwrap_or_default()).into());
        }
    }

    let list_name = addresses::local_part(&recipient);
    let list = match List::find_active_by_name(list_name, &deps.db_pool).await? {
        Some(list) => list,
        None => {
            warn!(list = %list_name, "no active list for recipient, dropping message");
            return Ok(0);
        }
    };

    let members = Membership::members_of(list.id, &deps.db_pool).await?;
    let sent = forward_to_members(
        message,
        &list,
        &members,
        deps.mailer.as_ref(),
        &deps.list_config,
    )
    .await?;

    info!(list = %list.name, recipients = sent, "forwarded inbound message");
    Ok(sent)
}

/// Forward a message to every member except the original sender.
///
/// Deliveries are sequential. A transport failure propagates immediately;
/// the remaining members in the batch are not attempted.
pub async fn forward_to_members(
    message: &InboundEmail,
    list: &List,
    members: &[User],
    mailer: &dyn BaseMailer,
    cfg: &ListAddressConfig,
) -> Result<usize> {
    let sender = message.sender();

    let mut sent = 0;
    for member in members {
        let is_sender = sender
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(&member.email));
        if is_sender {
            continue;
        }

        let outbound = composer::forward_email(member, message, list, cfg);
        mailer.deliver(&outbound).await?;
        sent += 1;
    }

    Ok(sent)
}
