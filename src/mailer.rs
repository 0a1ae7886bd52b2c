//! Mailer facade.

use std::sync::Arc;

use tracing::Instrument;

#[cfg(feature = "metrics")]
use std::time::Instant;

use crate::adapter::{DeliveryResult, ServiceAdapter};
use crate::email::Email;
use crate::error::MailError;

/// Sends emails through one configured [`ServiceAdapter`].
///
/// The adapter is fixed for the lifetime of the mailer. `send` adds no
/// validation, retry or transformation of its own: the email reaches the
/// adapter exactly as given.
///
/// ```ignore
/// use emailer::Mailer;
/// use emailer::providers::MailgunAdapter;
///
/// let mailer = Mailer::new(MailgunAdapter::new(api_key, "mg.example.com"));
/// mailer.send(&email).await?;
/// ```
#[derive(Clone)]
pub struct Mailer {
    adapter: Arc<dyn ServiceAdapter>,
}

impl Mailer {
    /// Create a mailer around `adapter`.
    pub fn new<A: ServiceAdapter + 'static>(adapter: A) -> Self {
        Self {
            adapter: Arc::new(adapter),
        }
    }

    /// Create a mailer around an already shared adapter.
    pub fn with_arc(adapter: Arc<dyn ServiceAdapter>) -> Self {
        Self { adapter }
    }

    /// Create a mailer from environment variables.
    ///
    /// See [`adapter_from_env`](crate::adapter_from_env) for the variables read.
    pub fn from_env() -> Result<Self, MailError> {
        Ok(Self::with_arc(crate::adapter_from_env()?))
    }

    /// The configured adapter.
    pub fn adapter(&self) -> &dyn ServiceAdapter {
        self.adapter.as_ref()
    }

    /// Forward `email` to the adapter.
    pub async fn send(&self, email: &Email) -> Result<DeliveryResult, MailError> {
        let provider = self.adapter.provider_name();

        let span = tracing::info_span!(
            "emailer.send",
            provider = provider,
            to = ?email.to().iter().map(|r| r.email()).collect::<Vec<_>>(),
            subject = ?email.subject(),
        );

        async {
            tracing::debug!("Sending email");

            #[cfg(feature = "metrics")]
            let start = Instant::now();

            let result = self.adapter.send(email).await;

            #[cfg(feature = "metrics")]
            {
                let duration = start.elapsed().as_secs_f64();
                let status = if result.is_ok() { "success" } else { "error" };
                metrics::counter!("emailer_emails_total", "provider" => provider, "status" => status)
                    .increment(1);
                metrics::histogram!("emailer_send_duration_seconds", "provider" => provider)
                    .record(duration);
            }

            match &result {
                Ok(r) => tracing::info!(message_id = %r.message_id, "Email sent"),
                Err(e) => tracing::error!(error = %e, "Email sending failed"),
            }

            result
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("provider", &self.adapter.provider_name())
            .finish()
    }
}
