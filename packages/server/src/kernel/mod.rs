//! Kernel module - infrastructure traits and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{MailgunAdapter, ServerDeps};
pub use test_dependencies::{MockListProvider, MockMailer, ProviderCall};
pub use traits::*;
