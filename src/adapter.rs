//! Service adapter trait and delivery result types.
//!
//! # Why `async_trait`?
//!
//! [`Mailer`](crate::Mailer) stores its adapter as `Arc<dyn ServiceAdapter>` so
//! the provider can be picked at runtime (see [`adapter_from_env`](crate::adapter_from_env)).
//! Native async trait methods are not object safe, so the trait goes through
//! `#[async_trait]`, which boxes the returned future. Sending is network bound
//! and the allocation does not show up next to the request latency.
//!
//! Calling `send` on a concrete adapter type skips the dynamic dispatch:
//!
//! ```ignore
//! let adapter = MailgunAdapter::new(api_key, "mg.example.com");
//! adapter.send(&email).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::email::Email;
use crate::error::MailError;

/// Result of a successful email delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Message ID assigned by the provider
    pub message_id: String,
    /// Optional provider-specific response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<serde_json::Value>,
}

impl DeliveryResult {
    /// Create a new delivery result with just a message ID.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: None,
        }
    }

    /// Create a delivery result with provider response.
    pub fn with_response(message_id: impl Into<String>, response: serde_json::Value) -> Self {
        Self {
            message_id: message_id.into(),
            provider_response: Some(response),
        }
    }
}

/// Capability to send an [`Email`] through some provider.
///
/// Every provider adapter implements this trait. Adapters hold only their
/// provider configuration, set at construction, so they can be shared freely.
///
/// # Example
///
/// ```ignore
/// use emailer::{Email, ServiceAdapter};
/// use emailer::providers::MailgunAdapter;
///
/// let adapter = MailgunAdapter::new("key-xxxx", "mg.example.com");
///
/// let mut email = Email::new();
/// email.set_from("Bob", "bob@host.com")?.set_to("to", "Alice", "alice@x.com")?;
/// email.set_subject("Hello").set_text("World");
///
/// let result = adapter.send(&email).await?;
/// println!("Sent with ID: {}", result.message_id);
/// ```
#[async_trait]
pub trait ServiceAdapter: Send + Sync {
    /// Send a single email.
    ///
    /// Validation failures and provider errors are returned as-is; adapters
    /// never retry.
    async fn send(&self, email: &Email) -> Result<DeliveryResult, MailError>;

    /// Get the provider name (for logging/debugging).
    fn provider_name(&self) -> &'static str {
        "unknown"
    }
}
