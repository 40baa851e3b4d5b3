//! Server dependencies for domain activities (using traits for testability)
//!
//! This module provides the central dependency container used by all domain
//! activities. External services use trait abstractions to enable testing.

use anyhow::Result;
use async_trait::async_trait;
use mailgun::MailgunService;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::ListAddressConfig;
use crate::kernel::{BaseListProvider, BaseMailer, ListFieldUpdate};

// =============================================================================
// MailgunService Adapter (implements BaseListProvider trait)
// =============================================================================

/// Wrapper around MailgunService that implements BaseListProvider
pub struct MailgunAdapter(pub Arc<MailgunService>);

impl MailgunAdapter {
    pub fn new(service: Arc<MailgunService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseListProvider for MailgunAdapter {
    async fn create_list(&self, name: &str, description: &str) -> Result<String> {
        self.0
            .create_list(name, description)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn update_list(&self, external_address: &str, fields: &ListFieldUpdate) -> Result<()> {
        self.0
            .update_list(
                external_address,
                fields.name.as_deref(),
                fields.description.as_deref(),
            )
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn delete_list(&self, external_address: &str) -> Result<()> {
        self.0
            .delete_list(external_address)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn add_member(
        &self,
        external_address: &str,
        email: &str,
        display_name: &str,
    ) -> Result<()> {
        self.0
            .add_member(external_address, email, display_name)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn remove_member(&self, external_address: &str, email: &str) -> Result<()> {
        self.0
            .remove_member(external_address, email)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }

    async fn send_message(
        &self,
        external_address: &str,
        from_name: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<()> {
        self.0
            .send_message(external_address, from_name, subject, text, html)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies accessible to domain activities (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    pub provider: Arc<dyn BaseListProvider>,
    pub mailer: Arc<dyn BaseMailer>,
    /// List addressing, built once at startup from Config.
    pub list_config: ListAddressConfig,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        db_pool: PgPool,
        provider: Arc<dyn BaseListProvider>,
        mailer: Arc<dyn BaseMailer>,
        list_config: ListAddressConfig,
    ) -> Self {
        Self {
            db_pool,
            provider,
            mailer,
            list_config,
        }
    }
}
