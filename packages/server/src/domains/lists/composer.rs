//! Outbound message composition: subject tagging and conversation threading.
//!
//! Mail clients group messages by the References / In-Reply-To chain. A
//! forwarded copy chains onto the original Message-ID when there is one;
//! otherwise (and for every broadcast) a deterministic synthetic id derived
//! from the list and the normalized subject keeps same-subject messages in
//! one visual thread.

use sha2::{Digest, Sha256};

use crate::common::utils::addresses;
use crate::config::ListAddressConfig;
use crate::domains::lists::messages::{InboundEmail, OutboundEmail};
use crate::domains::lists::models::list::List;
use crate::domains::lists::models::user::User;

/// Prefix a subject with the bracketed list tag.
pub fn add_list_prefix(subject: &str, list_name: &str) -> String {
    format!("[{}] {}", list_name, subject)
}

/// Remove a leading "[list]" tag, preserving a "Re:" reply marker.
///
/// "Re: [team] Plans" → "Re: Plans", "[team] Plans" → "Plans"; a subject
/// without the tag comes back unchanged. Together with add_list_prefix this
/// makes tagging idempotent under repeated forwarding.
pub fn strip_list_prefix(subject: &str, list_name: &str) -> String {
    let tag = format!("[{}]", list_name);

    let (had_re, rest) = match split_reply_marker(subject) {
        Some(rest) => (true, rest),
        None => (false, subject),
    };

    let tagged = rest
        .get(..tag.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(&tag));
    if !tagged {
        return subject.to_string();
    }

    let remainder = rest[tag.len()..].trim_start();
    if had_re {
        format!("Re: {}", remainder)
    } else {
        remainder.to_string()
    }
}

/// Split off a leading "Re:" (any case) and the whitespace after it.
fn split_reply_marker(subject: &str) -> Option<&str> {
    let head = subject.get(..3)?;
    if head.eq_ignore_ascii_case("re:") {
        Some(subject[3..].trim_start())
    } else {
        None
    }
}

/// Deterministic thread id for messages that cannot chain onto an existing
/// Message-ID.
///
/// Same list + same normalized subject always yields the same id, which is
/// what folds repeated broadcasts (and forwards of id-less messages) under
/// one subject into a single conversation.
pub fn thread_id(subject: &str, list: &List, cfg: &ListAddressConfig) -> String {
    let normalized = split_reply_marker(subject)
        .unwrap_or(subject)
        .trim()
        .to_lowercase();

    let mut hasher = Sha256::new();
    hasher.update(format!("{}-{}", list.name, normalized).as_bytes());
    let digest = format!("{:x}", hasher.finalize());

    let address = list.email_address(cfg);
    let domain = addresses::domain_part(&address).unwrap_or_else(|| cfg.fqdn());

    format!("<thread-{}@{}>", &digest[..17], domain)
}

/// Build the copy of an inbound message relayed to one member.
pub fn forward_email(
    member: &User,
    original: &InboundEmail,
    list: &List,
    cfg: &ListAddressConfig,
) -> OutboundEmail {
    let list_address = list.email_address(cfg);
    let clean_subject = strip_list_prefix(&original.subject, &list.name);
    let subject = add_list_prefix(&clean_subject, &list.name);

    let (in_reply_to, references) = match &original.message_id {
        Some(message_id) => {
            let references = match &original.references {
                Some(existing) if !existing.trim().is_empty() => {
                    format!("{} {}", existing, message_id)
                }
                _ => message_id.clone(),
            };
            (Some(message_id.clone()), references)
        }
        // No Message-ID to chain onto: open a deterministic thread so later
        // same-subject traffic lands in the same conversation.
        None => (None, thread_id(&clean_subject, list, cfg)),
    };

    let sender = original.from.first().cloned().unwrap_or_default();

    OutboundEmail {
        to: member.email.clone(),
        from: list_address.clone(),
        reply_to: list_address.clone(),
        subject,
        in_reply_to,
        references: Some(references),
        text_body: forward_text_body(
            &sender,
            &original.subject,
            original.content.text_part(),
            list,
            &list_address,
        ),
        html_body: forward_html_body(
            &sender,
            &original.subject,
            original.content.html_part(),
            list,
            &list_address,
        ),
    }
}

/// Build a broadcast (list-authored) message for one member.
///
/// Broadcast subjects arrive untagged, so there is nothing to strip; the
/// synthetic References id is always present so repeated broadcasts under
/// one subject thread together.
pub fn broadcast_email(
    member: &User,
    list: &List,
    subject: &str,
    text_body: &str,
    html_body: &str,
    sender_display_name: &str,
    cfg: &ListAddressConfig,
) -> OutboundEmail {
    let list_address = list.email_address(cfg);

    OutboundEmail {
        to: member.email.clone(),
        from: format!("{} <{}>", sender_display_name, list_address),
        reply_to: list_address,
        subject: add_list_prefix(subject, &list.name),
        in_reply_to: None,
        references: Some(thread_id(subject, list, cfg)),
        text_body: text_body.to_string(),
        html_body: html_body.to_string(),
    }
}

fn forward_text_body(
    sender: &str,
    subject: &str,
    text: &str,
    list: &List,
    list_address: &str,
) -> String {
    format!(
        "From: {}\nSubject: {}\n\n{}\n\n-- \nYou received this because you are a member of the {} list.\nReply to the list: {}\n",
        sender, subject, text, list.name, list_address
    )
}

fn forward_html_body(
    sender: &str,
    subject: &str,
    html: &str,
    list: &List,
    list_address: &str,
) -> String {
    format!(
        "<div>\n<p><strong>From:</strong> {}<br/><strong>Subject:</strong> {}</p>\n<div>{}</div>\n<hr/>\n<p>You received this because you are a member of the <em>{}</em> list.<br/>Reply to the list: <a href=\"mailto:{}\">{}</a></p>\n</div>\n",
        sender, subject, html, list.name, list_address, list_address
    )
}
