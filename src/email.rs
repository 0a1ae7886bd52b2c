//! Email value object with validating setters.

use serde::Serialize;
use std::collections::HashMap;

use crate::address::Address;
use crate::error::ValidationError;
use crate::recipient::{Recipient, RecipientType, ToRecipientType};

/// An email message.
///
/// Setters that take addresses validate their input and fail fast, so an
/// `Email` never holds a malformed sender or recipient. Whether the message is
/// complete enough to send (sender, at least one `to`, a body) is checked by
/// the adapter at send time.
///
/// ```
/// use emailer::{Email, RecipientType};
///
/// let mut email = Email::new();
/// email
///     .set_from("Bob", "bob@host.com")?
///     .set_to("to", "Alice", "alice@x.com")?
///     .set_to(RecipientType::Cc, "Carl", "carl@x.com")?;
/// email.set_subject("Hello!").set_text("Plain text content");
///
/// assert_eq!(email.to().len(), 2);
/// # Ok::<(), emailer::ValidationError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Email {
    from: Option<Address>,
    to: Vec<Recipient>,
    subject: Option<String>,
    headers: HashMap<String, String>,
    html: String,
    text: String,
    tag: Option<String>,
}

impl Email {
    /// Create a new empty email.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sender, replacing any previous one.
    pub fn set_from(&mut self, name: &str, email: &str) -> Result<&mut Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName("From"));
        }

        self.from = Some(Address::parse_with_name(name, email)?);
        Ok(self)
    }

    /// Sender, if set.
    pub fn from(&self) -> Option<&Address> {
        self.from.as_ref()
    }

    /// Append a `to`, `cc` or `bcc` recipient.
    ///
    /// Entries are never deduplicated and keep their insertion order.
    pub fn set_to(
        &mut self,
        kind: impl ToRecipientType,
        name: &str,
        email: &str,
    ) -> Result<&mut Self, ValidationError> {
        let kind = kind.to_recipient_type()?;

        if name.is_empty() {
            return Err(ValidationError::EmptyName("To"));
        }

        let address = Address::parse_with_name(name, email)?;
        self.to.push(Recipient { kind, address });
        Ok(self)
    }

    /// All recipient entries in insertion order.
    pub fn to(&self) -> &[Recipient] {
        &self.to
    }

    /// Recipient entries of one type, in insertion order.
    pub fn recipients(&self, kind: RecipientType) -> impl Iterator<Item = &Recipient> + '_ {
        self.to.iter().filter(move |r| r.kind == kind)
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> &mut Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Set a custom header. A later value for the same name replaces the earlier one.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn set_html(&mut self, html: impl Into<String>) -> &mut Self {
        self.html = html.into();
        self
    }

    /// HTML body, empty when unset.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }

    /// Plain text body, empty when unset.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Set the provider tag used for analytics.
    pub fn set_tag(&mut self, tag: impl Into<String>) -> &mut Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Whether either body variant is non-empty.
    pub fn has_body(&self) -> bool {
        !self.html.is_empty() || !self.text.is_empty()
    }
}
