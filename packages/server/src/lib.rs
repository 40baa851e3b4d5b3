// Neighborhood Lists - Relay Core
//
// This crate implements the mailing-list relay: inbound messages addressed to
// {list}@{subdomain}.{domain} are forwarded to every member except the sender,
// the local roster is kept in lock-step with the Mailgun mailing-list API, and
// outbound messages carry the reply headers that keep them threading correctly
// in mail clients.
//
// The ingestion transport (webhook verification, MIME parsing) and the SMTP
// transport are external collaborators consumed through kernel traits.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;

pub use config::*;
