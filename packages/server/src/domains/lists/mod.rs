//! Mailing list domain - rosters, inbound relay, provider sync, threading.
//!
//! Control flow for the relay path: the ingestion transport hands
//! `inbound::handle_inbound` a parsed message → the target list is resolved
//! from the recipient address → `composer::forward_email` builds one copy
//! per member → the mailer delivers each copy.

pub mod activities;
pub mod composer;
pub mod inbound;
pub mod messages;
pub mod models;

// Re-export commonly used types
pub use models::list::List;
pub use models::membership::Membership;
pub use models::user::User;
