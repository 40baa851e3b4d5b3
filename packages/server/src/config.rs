use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Addressing for relayed lists.
///
/// Constructed once at startup and passed in through `ServerDeps`; routing
/// and composition code never reads the environment directly.
#[derive(Debug, Clone)]
pub struct ListAddressConfig {
    pub subdomain: String,
    pub domain: String,
}

impl ListAddressConfig {
    pub fn new(subdomain: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            subdomain: subdomain.into(),
            domain: domain.into(),
        }
    }

    /// The fully qualified list domain, e.g. "lists.example.com".
    pub fn fqdn(&self) -> String {
        format!("{}.{}", self.subdomain, self.domain)
    }

    /// The relay address for a list name, e.g. "announce@lists.example.com".
    pub fn address_for(&self, list_name: &str) -> String {
        format!("{}@{}", list_name, self.fqdn())
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub mailgun_api_key: String,
    pub mailgun_api_base: String,
    pub list_subdomain: String,
    pub list_domain: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            mailgun_api_key: env::var("MAILGUN_API_KEY")
                .context("MAILGUN_API_KEY must be set")?,
            mailgun_api_base: env::var("MAILGUN_API_BASE")
                .unwrap_or_else(|_| "https://api.mailgun.net/v3".to_string()),
            list_subdomain: env::var("LIST_SUBDOMAIN")
                .unwrap_or_else(|_| "lists".to_string()),
            list_domain: env::var("LIST_DOMAIN")
                .context("LIST_DOMAIN must be set")?,
        })
    }

    pub fn list_addresses(&self) -> ListAddressConfig {
        ListAddressConfig::new(&self.list_subdomain, &self.list_domain)
    }
}
