// TestDependencies - mock implementations for testing
//
// Provides a mock list provider and mailer that can be injected into
// ServerDeps for tests.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domains::lists::messages::OutboundEmail;
use crate::kernel::{BaseListProvider, BaseMailer, ListFieldUpdate};

// =============================================================================
// Mock List Provider
// =============================================================================

/// A provider call captured by the mock, in invocation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    CreateList {
        name: String,
        description: String,
    },
    UpdateList {
        address: String,
        name: Option<String>,
        description: Option<String>,
    },
    DeleteList {
        address: String,
    },
    AddMember {
        address: String,
        email: String,
        display_name: String,
    },
    RemoveMember {
        address: String,
        email: String,
    },
    SendMessage {
        address: String,
        from_name: String,
        subject: String,
    },
}

pub struct MockListProvider {
    calls: Arc<Mutex<Vec<ProviderCall>>>,
    failing: Arc<Mutex<bool>>,
    list_addresses: Arc<Mutex<Vec<String>>>,
}

impl MockListProvider {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failing: Arc::new(Mutex::new(false)),
            list_addresses: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an address to be returned by the next create_list call.
    pub fn with_list_address(self, address: &str) -> Self {
        self.list_addresses.lock().unwrap().push(address.to_string());
        self
    }

    /// Make every subsequent call fail.
    pub fn failing(self) -> Self {
        self.set_failing(true);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Emails passed to add_member, in order.
    pub fn member_adds(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ProviderCall::AddMember { email, .. } => Some(email),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ProviderCall) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if *self.failing.lock().unwrap() {
            anyhow::bail!("simulated provider failure");
        }
        Ok(())
    }
}

impl Default for MockListProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseListProvider for MockListProvider {
    async fn create_list(&self, name: &str, description: &str) -> Result<String> {
        self.record(ProviderCall::CreateList {
            name: name.to_string(),
            description: description.to_string(),
        })?;

        let mut queued = self.list_addresses.lock().unwrap();
        if queued.is_empty() {
            Ok(format!("{}@lists.provider.test", name))
        } else {
            Ok(queued.remove(0))
        }
    }

    async fn update_list(&self, external_address: &str, fields: &ListFieldUpdate) -> Result<()> {
        self.record(ProviderCall::UpdateList {
            address: external_address.to_string(),
            name: fields.name.clone(),
            description: fields.description.clone(),
        })
    }

    async fn delete_list(&self, external_address: &str) -> Result<()> {
        self.record(ProviderCall::DeleteList {
            address: external_address.to_string(),
        })
    }

    async fn add_member(
        &self,
        external_address: &str,
        email: &str,
        display_name: &str,
    ) -> Result<()> {
        self.record(ProviderCall::AddMember {
            address: external_address.to_string(),
            email: email.to_string(),
            display_name: display_name.to_string(),
        })
    }

    async fn remove_member(&self, external_address: &str, email: &str) -> Result<()> {
        self.record(ProviderCall::RemoveMember {
            address: external_address.to_string(),
            email: email.to_string(),
        })
    }

    async fn send_message(
        &self,
        external_address: &str,
        from_name: &str,
        subject: &str,
        _text: &str,
        _html: &str,
    ) -> Result<()> {
        self.record(ProviderCall::SendMessage {
            address: external_address.to_string(),
            from_name: from_name.to_string(),
            subject: subject.to_string(),
        })
    }
}

// =============================================================================
// Mock Mailer
// =============================================================================

pub struct MockMailer {
    sent: Arc<Mutex<Vec<OutboundEmail>>>,
    fail_from: Arc<Mutex<Option<usize>>>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail_from: Arc::new(Mutex::new(None)),
        }
    }

    /// Deliver the first `n` messages, fail every one after that.
    pub fn fail_after(self, n: usize) -> Self {
        *self.fail_from.lock().unwrap() = Some(n);
        self
    }

    /// All delivered messages, in order.
    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Recipient addresses of delivered messages, in order.
    pub fn recipients(&self) -> Vec<String> {
        self.sent().into_iter().map(|email| email.to).collect()
    }

    pub fn was_sent_to(&self, address: &str) -> bool {
        self.sent.lock().unwrap().iter().any(|e| e.to == address)
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseMailer for MockMailer {
    async fn deliver(&self, email: &OutboundEmail) -> Result<()> {
        let mut sent = self.sent.lock().unwrap();
        if let Some(limit) = *self.fail_from.lock().unwrap() {
            if sent.len() >= limit {
                anyhow::bail!("simulated transport failure");
            }
        }
        sent.push(email.clone());
        Ok(())
    }
}
