//! Named email address.

use crate::error::ValidationError;
use email_address::{EmailAddress, Options};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An email address with a display name.
///
/// Addresses are only built through [`Address::parse_with_name`], so the
/// `email` field always holds a syntactically valid address.
///
/// # Examples
///
/// ```
/// use emailer::Address;
///
/// let addr = Address::parse_with_name("Bob", "bob@host.com").unwrap();
/// assert_eq!(addr.formatted(), "Bob <bob@host.com>");
///
/// assert!(Address::parse_with_name("Bob", "invalid[at]example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Display name (e.g., "Alice Smith")
    pub name: String,
    /// Email address (e.g., "alice@example.com")
    pub email: String,
}

impl Address {
    /// Validate `email` and pair it with `name`.
    ///
    /// Uses RFC 5321/5322 compliant validation. Only a bare address is
    /// accepted: display text such as `Eve <eve@x.com>` is rejected, since the
    /// name arrives separately. The name is stored verbatim; callers that
    /// require a non-empty name check it themselves so they can report which
    /// field was at fault.
    pub fn parse_with_name(name: &str, email: &str) -> Result<Self, ValidationError> {
        let options = Options::default().without_display_text();
        if EmailAddress::parse_with_options(email, options).is_err() {
            return Err(ValidationError::InvalidAddress(email.to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }

    /// Format as `Name <email>`.
    pub fn formatted(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
