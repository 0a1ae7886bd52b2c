//! Mailgun API provider.
//!
//! For reference: [Mailgun API docs](https://documentation.mailgun.com/en/latest/api-sending.html#sending)
//!
//! # Example
//!
//! ```rust,ignore
//! use emailer::providers::MailgunAdapter;
//!
//! let adapter = MailgunAdapter::new("your-api-key", "mg.yourdomain.com");
//! ```
//!
//! ## Configuration
//!
//! * `api_key` - Your Mailgun API key
//! * `domain` - Your sending domain (e.g., "mg.yourdomain.com" or sandbox domain)
//!
//! For EU domains, build the client yourself:
//!
//! ```rust,ignore
//! let client = HttpMailgunClient::new("your-api-key").base_url("https://api.eu.mailgun.net/v3");
//! let adapter = MailgunAdapter::with_client(client, "mg.yourdomain.com");
//! ```
//!
//! ## Payload
//!
//! [`MailgunAdapter::build_message`] turns an [`Email`] into a flat form:
//!
//! | Key | Value |
//! |-----|-------|
//! | `from` | `Name <email>` |
//! | `to`, `cc`, `bcc` | `Name <email>` entries joined with `", "`; `cc`/`bcc` only when present |
//! | `subject` | subject, empty when unset |
//! | `html`, `text` | each only when non-empty |
//! | `h:<name>` | one per custom header |
//! | `o:tag` | tag, only when non-empty |
//!
//! Attachments (`attachment`), inline files (`o:inline`) and campaigns
//! (`o:campaign`) are not supported; [`Email`] has no field for them.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(feature = "mailgun")]
use base64::Engine;
#[cfg(feature = "mailgun")]
use reqwest::{multipart::Form, Client};
#[cfg(feature = "mailgun")]
use serde::Deserialize;

use crate::adapter::{DeliveryResult, ServiceAdapter};
use crate::email::Email;
use crate::error::{MailError, ValidationError};
use crate::recipient::RecipientType;

#[cfg(feature = "mailgun")]
const MAILGUN_BASE_URL: &str = "https://api.mailgun.net/v3";

/// Flat key/value form sent to Mailgun for one message.
///
/// Keys iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, String>);

impl Payload {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }
}

/// Client for the Mailgun messages endpoint.
///
/// [`MailgunAdapter`] only builds payloads; the wire protocol lives behind this
/// trait. [`HttpMailgunClient`] is the HTTP implementation.
#[async_trait]
pub trait MailgunClient: Send + Sync {
    /// Send one message for `domain`.
    async fn send_message(&self, domain: &str, payload: &Payload)
        -> Result<DeliveryResult, MailError>;
}

/// Hook that sees every payload before it is handed to the client.
///
/// Closures taking `(domain, payload)` implement it:
///
/// ```rust,ignore
/// let adapter = MailgunAdapter::new(key, domain)
///     .inspect_with(|domain: &str, payload: &Payload| {
///         println!("{domain}: {:?}", payload);
///     });
/// ```
pub trait PayloadInspector: Send + Sync {
    fn inspect(&self, domain: &str, payload: &Payload);
}

impl<F> PayloadInspector for F
where
    F: Fn(&str, &Payload) + Send + Sync,
{
    fn inspect(&self, domain: &str, payload: &Payload) {
        (self)(domain, payload)
    }
}

/// Mailgun email adapter.
#[derive(Clone)]
pub struct MailgunAdapter {
    client: Arc<dyn MailgunClient>,
    domain: String,
    inspector: Option<Arc<dyn PayloadInspector>>,
}

impl MailgunAdapter {
    /// Create a new Mailgun adapter with the given API key and domain.
    #[cfg(feature = "mailgun")]
    pub fn new(api_key: impl Into<String>, domain: impl Into<String>) -> Self {
        Self::with_client(HttpMailgunClient::new(api_key), domain)
    }

    /// Create with a custom Mailgun client.
    pub fn with_client<C: MailgunClient + 'static>(client: C, domain: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            domain: domain.into(),
            inspector: None,
        }
    }

    /// Attach a hook that receives each built payload.
    pub fn inspect_with<I: PayloadInspector + 'static>(mut self, inspector: I) -> Self {
        self.inspector = Some(Arc::new(inspector));
        self
    }

    /// The sending domain.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Build the Mailgun payload for `email`.
    ///
    /// Fails when the sender is missing, when there is no `to` recipient
    /// (cc and bcc do not count) or when both bodies are empty, checked in
    /// that order.
    pub fn build_message(email: &Email) -> Result<Payload, ValidationError> {
        let from = format_from(email)?;
        let to = format_recipients(email, RecipientType::To);

        if to.is_empty() {
            return Err(ValidationError::MissingRecipients);
        }

        let mut payload = Payload::default();
        payload.insert("from", from);
        payload.insert("to", to);
        payload.insert("subject", email.subject().unwrap_or_default());

        if !email.has_body() {
            return Err(ValidationError::MissingBody);
        }
        if !email.html().is_empty() {
            payload.insert("html", email.html());
        }
        if !email.text().is_empty() {
            payload.insert("text", email.text());
        }

        let cc = format_recipients(email, RecipientType::Cc);
        if !cc.is_empty() {
            payload.insert("cc", cc);
        }
        let bcc = format_recipients(email, RecipientType::Bcc);
        if !bcc.is_empty() {
            payload.insert("bcc", bcc);
        }

        for (name, value) in email.headers() {
            payload.insert(format!("h:{}", name), value.as_str());
        }

        if let Some(tag) = email.tag().filter(|t| !t.is_empty()) {
            payload.insert("o:tag", tag);
        }

        Ok(payload)
    }
}

fn format_from(email: &Email) -> Result<String, ValidationError> {
    match email.from() {
        Some(from) if !from.name.is_empty() && !from.email.is_empty() => Ok(from.formatted()),
        _ => Err(ValidationError::MissingFrom),
    }
}

fn format_recipients(email: &Email, kind: RecipientType) -> String {
    email
        .recipients(kind)
        .map(|r| r.formatted())
        .collect::<Vec<_>>()
        .join(", ")
}

#[async_trait]
impl ServiceAdapter for MailgunAdapter {
    async fn send(&self, email: &Email) -> Result<DeliveryResult, MailError> {
        let payload = Self::build_message(email)?;

        tracing::debug!(
            domain = %self.domain,
            keys = ?payload.keys().collect::<Vec<_>>(),
            "Built Mailgun payload"
        );

        if let Some(ref inspector) = self.inspector {
            inspector.inspect(&self.domain, &payload);
        }

        self.client.send_message(&self.domain, &payload).await
    }

    fn provider_name(&self) -> &'static str {
        "mailgun"
    }
}

/// Mailgun messages API over HTTP.
#[cfg(feature = "mailgun")]
pub struct HttpMailgunClient {
    api_key: String,
    base_url: String,
    client: Client,
}

#[cfg(feature = "mailgun")]
impl HttpMailgunClient {
    /// Create a client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(api_key, Client::new())
    }

    /// Create with a custom reqwest client.
    pub fn with_client(api_key: impl Into<String>, client: Client) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: MAILGUN_BASE_URL.to_string(),
            client,
        }
    }

    /// Set a custom base URL (e.g., for EU: "https://api.eu.mailgun.net/v3").
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn auth_header(&self) -> String {
        let credentials = format!("api:{}", self.api_key);
        let encoded = base64::engine::general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {}", encoded)
    }

    fn build_form(payload: &Payload) -> Form {
        payload.iter().fold(Form::new(), |form, (key, value)| {
            form.text(key.to_string(), value.to_string())
        })
    }
}

#[cfg(feature = "mailgun")]
#[async_trait]
impl MailgunClient for HttpMailgunClient {
    async fn send_message(
        &self,
        domain: &str,
        payload: &Payload,
    ) -> Result<DeliveryResult, MailError> {
        let url = format!("{}/{}/messages", self.base_url, domain);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.auth_header())
            .header("User-Agent", format!("emailer/{}", crate::VERSION))
            .multipart(Self::build_form(payload))
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let result: MailgunResponse = response.json().await?;
            Ok(DeliveryResult::with_response(
                result.id,
                serde_json::json!({
                    "provider": "mailgun",
                    "message": result.message,
                }),
            ))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            let error_msg = serde_json::from_str::<MailgunError>(&error_body)
                .map(|e| e.message)
                .unwrap_or(error_body);

            Err(MailError::provider_with_status(
                "mailgun",
                error_msg,
                status.as_u16(),
            ))
        }
    }
}

// ============================================================================
// Mailgun API Types
// ============================================================================

#[cfg(feature = "mailgun")]
#[derive(Debug, Deserialize)]
struct MailgunResponse {
    id: String,
    message: String,
}

#[cfg(feature = "mailgun")]
#[derive(Debug, Deserialize)]
struct MailgunError {
    message: String,
}
