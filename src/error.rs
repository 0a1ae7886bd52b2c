//! Error types for emailer.

use thiserror::Error;

/// Invalid or incomplete email data.
///
/// Returned by the validating [`Email`](crate::Email) setters and by payload
/// builders. Each variant is a distinct kind so callers can match on it
/// instead of parsing the message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Address failed email syntax validation.
    #[error("Email '{0}' is invalid")]
    InvalidAddress(String),

    /// A display name was required but empty. Holds the field label.
    #[error("{0} name must be provided")]
    EmptyName(&'static str),

    /// Recipient type other than `to`, `cc` or `bcc`.
    #[error("Type '{0}' is not allowed, must be either 'to', 'cc' or 'bcc'")]
    InvalidRecipientType(String),

    /// No sender set.
    #[error("From parameter is missing")]
    MissingFrom,

    /// No `to` recipient set.
    #[error("An email must have at least a single recipient")]
    MissingRecipients,

    /// Both HTML and text bodies are empty.
    #[error("A message body in HTML or text is missing")]
    MissingBody,
}

/// Errors that can occur when sending emails.
#[derive(Debug, Clone, Error)]
pub enum MailError {
    /// The email itself is invalid.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration error (missing env var, invalid value, etc.)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider-specific error with details.
    #[error("Provider error ({provider}): {message}")]
    ProviderError {
        provider: &'static str,
        message: String,
        /// Optional HTTP status code
        status: Option<u16>,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(String),
}

impl MailError {
    /// Create a provider-specific error.
    pub fn provider(provider: &'static str, message: impl Into<String>) -> Self {
        Self::ProviderError {
            provider,
            message: message.into(),
            status: None,
        }
    }

    /// Create a provider error with HTTP status.
    pub fn provider_with_status(
        provider: &'static str,
        message: impl Into<String>,
        status: u16,
    ) -> Self {
        Self::ProviderError {
            provider,
            message: message.into(),
            status: Some(status),
        }
    }

    /// Whether this error was caused by invalid email data rather than delivery.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(feature = "mailgun")]
impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for MailError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
