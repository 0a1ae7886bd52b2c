//! Logger adapter that only logs emails.
//!
//! Useful for staging environments or when you want to see what would be sent
//! without actually sending anything.

use async_trait::async_trait;

use crate::adapter::{DeliveryResult, ServiceAdapter};
use crate::email::Email;
use crate::error::MailError;
use crate::recipient::RecipientType;

/// Logger adapter that emits tracing events for emails.
pub struct LoggerAdapter {
    /// If true, log full email details. If false, just log recipient summary.
    log_full: bool,
}

impl LoggerAdapter {
    /// Create a logger adapter with brief output (just recipients).
    pub fn new() -> Self {
        Self { log_full: false }
    }

    /// Create a logger adapter with full email details.
    pub fn full() -> Self {
        Self { log_full: true }
    }

    /// Set whether to log full email details.
    pub fn log_full(mut self, full: bool) -> Self {
        self.log_full = full;
        self
    }
}

impl Default for LoggerAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn formatted(email: &Email, kind: RecipientType) -> Vec<String> {
    email.recipients(kind).map(|r| r.formatted()).collect()
}

#[async_trait]
impl ServiceAdapter for LoggerAdapter {
    async fn send(&self, email: &Email) -> Result<DeliveryResult, MailError> {
        let message_id = uuid::Uuid::new_v4().to_string();

        if self.log_full {
            tracing::info!(
                message_id = %message_id,
                from = ?email.from().map(|a| a.formatted()),
                to = ?formatted(email, RecipientType::To),
                cc = ?formatted(email, RecipientType::Cc),
                bcc = ?formatted(email, RecipientType::Bcc),
                subject = ?email.subject(),
                headers = email.headers().len(),
                tag = ?email.tag(),
                has_html = !email.html().is_empty(),
                has_text = !email.text().is_empty(),
                "Email logged (full)"
            );

            if !email.text().is_empty() {
                tracing::debug!(body = %email.text(), "Text body");
            }
            if !email.html().is_empty() {
                tracing::debug!(body = %email.html(), "HTML body");
            }
        } else {
            tracing::info!(
                message_id = %message_id,
                to = ?email.to().iter().map(|r| r.email()).collect::<Vec<_>>(),
                subject = ?email.subject(),
                "Email logged"
            );
        }

        Ok(DeliveryResult::new(message_id))
    }

    fn provider_name(&self) -> &'static str {
        "logger"
    }
}
