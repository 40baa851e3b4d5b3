// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (like "forward this message") lives in domain functions
// that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseListProvider)

use anyhow::Result;
use async_trait::async_trait;

use crate::domains::lists::messages::OutboundEmail;

/// List metadata changes to mirror to the provider.
/// Only fields that actually changed are set.
#[derive(Debug, Clone, Default)]
pub struct ListFieldUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ListFieldUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

// =============================================================================
// List Provider Trait (Infrastructure - hosted mailing lists)
// =============================================================================

#[async_trait]
pub trait BaseListProvider: Send + Sync {
    /// Create a hosted list. Returns the provider-assigned list address.
    async fn create_list(&self, name: &str, description: &str) -> Result<String>;

    /// Push changed list metadata.
    async fn update_list(&self, external_address: &str, fields: &ListFieldUpdate) -> Result<()>;

    /// Delete the hosted list.
    async fn delete_list(&self, external_address: &str) -> Result<()>;

    /// Add (or upsert) a member on the hosted list.
    async fn add_member(
        &self,
        external_address: &str,
        email: &str,
        display_name: &str,
    ) -> Result<()>;

    /// Remove a member from the hosted list.
    async fn remove_member(&self, external_address: &str, email: &str) -> Result<()>;

    /// Send a message through the provider to the whole list.
    async fn send_message(
        &self,
        external_address: &str,
        from_name: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<()>;
}

// =============================================================================
// Mailer Trait (Infrastructure - outbound message transport)
// =============================================================================

#[async_trait]
pub trait BaseMailer: Send + Sync {
    /// Deliver one fully composed message. Transport retry/backoff is the
    /// implementation's concern, not the caller's.
    async fn deliver(&self, email: &OutboundEmail) -> Result<()>;
}
