//! Administrative operations on lists and rosters.

pub mod broadcast;
pub mod lists;
pub mod membership;
pub mod provider_sync;

pub use broadcast::{send_broadcast, BroadcastDelivery};
pub use lists::{create_list, delete_list, update_list};
pub use membership::{add_member, remove_member, MembershipSyncError};
