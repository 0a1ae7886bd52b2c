//! # Emailer
//!
//! Build transactional emails and send them through a pluggable provider adapter.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use emailer::{Email, Mailer};
//! use emailer::providers::MailgunAdapter;
//!
//! let mailer = Mailer::new(MailgunAdapter::new("key-xxxx", "mg.example.com"));
//!
//! let mut email = Email::new();
//! email
//!     .set_from("Bob", "bob@host.com")?
//!     .set_to("to", "Alice", "alice@x.com")?
//!     .set_to("cc", "Carl", "carl@x.com")?;
//! email.set_subject("Welcome!").set_text("Hello");
//!
//! mailer.send(&email).await?;
//! ```
//!
//! Addresses and recipient types are validated when they are set. Whether a
//! message is complete (sender, at least one `to` recipient, a body) is checked
//! by the adapter when it builds the provider payload.
//!
//! ## Environment Variables
//!
//! [`Mailer::from_env`] picks the adapter from the environment:
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `EMAIL_PROVIDER` | `mailgun`, `logger`, `logger_full` |
//! | `MAILGUN_API_KEY` | Mailgun API key |
//! | `MAILGUN_DOMAIN` | Mailgun sending domain |
//! | `MAILGUN_BASE_URL` | Mailgun API base URL (optional, e.g. EU region) |
//!
//! ## Feature Flags
//!
//! - `mailgun` (default) - HTTP client for the Mailgun messages API
//! - `metrics` - Prometheus-style metrics (counters/histograms)
//!
//! ## Metrics
//!
//! Enable `features = ["metrics"]` to emit Prometheus-style metrics:
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `emailer_emails_total` | Counter | provider, status | Total emails sent |
//! | `emailer_send_duration_seconds` | Histogram | provider | Send duration |

/// The version of the emailer crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod adapter;
mod address;
mod email;
mod error;
mod mailer;
mod recipient;

pub mod providers;

use std::env;
use std::sync::Arc;

// Re-exports
pub use adapter::{DeliveryResult, ServiceAdapter};
pub use address::Address;
pub use email::Email;
pub use error::{MailError, ValidationError};
pub use mailer::Mailer;
pub use recipient::{Recipient, RecipientType, ToRecipientType};

// ============================================================================
// Environment Configuration
// ============================================================================

/// Auto-detect provider based on enabled features and available API keys.
fn detect_provider() -> Option<&'static str> {
    #[cfg(feature = "mailgun")]
    if env::var("MAILGUN_API_KEY").is_ok() && env::var("MAILGUN_DOMAIN").is_ok() {
        return Some("mailgun");
    }
    None
}

fn provider_from_env() -> Result<String, MailError> {
    match env::var("EMAIL_PROVIDER") {
        Ok(p) => Ok(p.to_lowercase()),
        Err(_) => match detect_provider() {
            Some(p) => {
                tracing::debug!(provider = p, "Auto-detected email provider");
                Ok(p.to_string())
            }
            None => Err(MailError::Configuration(
                "EMAIL_PROVIDER not set and could not auto-detect. \
                Set EMAIL_PROVIDER or ensure MAILGUN_API_KEY and MAILGUN_DOMAIN are set."
                    .into(),
            )),
        },
    }
}

/// Create an adapter from environment variables.
///
/// Reads `EMAIL_PROVIDER`; when unset, Mailgun is picked if both
/// `MAILGUN_API_KEY` and `MAILGUN_DOMAIN` are present.
pub fn adapter_from_env() -> Result<Arc<dyn ServiceAdapter>, MailError> {
    let provider = provider_from_env()?;

    match provider.as_str() {
        #[cfg(feature = "mailgun")]
        "mailgun" => {
            let key = env::var("MAILGUN_API_KEY")
                .map_err(|_| MailError::Configuration("MAILGUN_API_KEY not set".into()))?;
            let domain = env::var("MAILGUN_DOMAIN")
                .map_err(|_| MailError::Configuration("MAILGUN_DOMAIN not set".into()))?;
            let mut client = providers::HttpMailgunClient::new(key);
            // Check for EU endpoint
            if let Ok(base_url) = env::var("MAILGUN_BASE_URL") {
                client = client.base_url(base_url);
            }
            Ok(Arc::new(providers::MailgunAdapter::with_client(client, domain)))
        }
        #[cfg(not(feature = "mailgun"))]
        "mailgun" => Err(MailError::Configuration(
            "EMAIL_PROVIDER=mailgun but 'mailgun' feature is not enabled. \
            Add `features = [\"mailgun\"]` to Cargo.toml"
                .into(),
        )),

        "logger" => Ok(Arc::new(providers::LoggerAdapter::new())),
        "logger_full" => Ok(Arc::new(providers::LoggerAdapter::full())),

        _ => Err(MailError::Configuration(format!(
            "Unknown EMAIL_PROVIDER: {}. Valid providers are: mailgun, logger, logger_full",
            provider
        ))),
    }
}

/// Check if email is configured (env vars are set and feature is enabled).
///
/// Logs a warning if Mailgun is requested but the feature flag is not enabled.
pub fn is_configured() -> bool {
    let provider = match provider_from_env() {
        Ok(p) => p,
        Err(_) => return false,
    };

    match provider.as_str() {
        #[cfg(feature = "mailgun")]
        "mailgun" => env::var("MAILGUN_API_KEY").is_ok() && env::var("MAILGUN_DOMAIN").is_ok(),
        #[cfg(not(feature = "mailgun"))]
        "mailgun" => {
            tracing::warn!(
                "EMAIL_PROVIDER=mailgun but 'mailgun' feature is not enabled. \
                Add `features = [\"mailgun\"]` to Cargo.toml"
            );
            false
        }

        "logger" | "logger_full" => true,

        _ => false,
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Address;
    pub use crate::DeliveryResult;
    pub use crate::Email;
    pub use crate::MailError;
    pub use crate::Mailer;
    pub use crate::RecipientType;
    pub use crate::ServiceAdapter;
    pub use crate::ValidationError;
    pub use crate::{adapter_from_env, is_configured};
}
