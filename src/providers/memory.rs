//! In-memory adapter for testing.
//!
//! Records every email it is asked to send so tests can assert on them.
//!
//! ```rust,ignore
//! use emailer::Mailer;
//! use emailer::providers::MemoryAdapter;
//!
//! #[tokio::test]
//! async fn test_sends_welcome_email() {
//!     let adapter = MemoryAdapter::new();
//!     let mailer = Mailer::new(adapter.clone());
//!
//!     send_welcome_email(&mailer, "user@example.com").await;
//!
//!     assert_eq!(adapter.count(), 1);
//!     assert_eq!(adapter.last().unwrap().to()[0].email(), "user@example.com");
//! }
//! ```

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::adapter::{DeliveryResult, ServiceAdapter};
use crate::email::Email;
use crate::error::MailError;

#[derive(Debug, Default)]
struct Inner {
    sent: RwLock<Vec<Email>>,
    /// If set, send() will return this error (for testing error paths).
    fail_with: RwLock<Option<String>>,
}

/// Adapter that keeps sent emails in memory.
///
/// Clones share the same record, so keep a clone around after handing the
/// adapter to a [`Mailer`](crate::Mailer).
#[derive(Debug, Clone, Default)]
pub struct MemoryAdapter {
    inner: Arc<Inner>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `send` fail with a provider error.
    pub fn set_failure(&self, message: impl Into<String>) {
        *self.inner.fail_with.write() = Some(message.into());
    }

    /// Clear the failure state.
    pub fn clear_failure(&self) {
        *self.inner.fail_with.write() = None;
    }

    /// All recorded emails, oldest first.
    pub fn sent(&self) -> Vec<Email> {
        self.inner.sent.read().clone()
    }

    /// The most recently recorded email.
    pub fn last(&self) -> Option<Email> {
        self.inner.sent.read().last().cloned()
    }

    pub fn count(&self) -> usize {
        self.inner.sent.read().len()
    }

    /// Forget all recorded emails.
    pub fn clear(&self) {
        self.inner.sent.write().clear();
    }
}

#[async_trait]
impl ServiceAdapter for MemoryAdapter {
    async fn send(&self, email: &Email) -> Result<DeliveryResult, MailError> {
        let failure = self.inner.fail_with.read().clone();
        if let Some(message) = failure {
            return Err(MailError::provider("memory", message));
        }

        self.inner.sent.write().push(email.clone());
        Ok(DeliveryResult::new(uuid::Uuid::new_v4().to_string()))
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
