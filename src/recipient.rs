//! Recipient entries and their addressing type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::address::Address;
use crate::error::ValidationError;

/// How a recipient is addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecipientType {
    To,
    Cc,
    Bcc,
}

impl RecipientType {
    /// The literal used on the wire: `to`, `cc` or `bcc`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::To => "to",
            Self::Cc => "cc",
            Self::Bcc => "bcc",
        }
    }
}

impl fmt::Display for RecipientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecipientType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "to" => Ok(Self::To),
            "cc" => Ok(Self::Cc),
            "bcc" => Ok(Self::Bcc),
            other => Err(ValidationError::InvalidRecipientType(other.to_string())),
        }
    }
}

/// Trait for values that name a recipient type.
///
/// Lets [`Email::set_to`](crate::Email::set_to) take either a
/// [`RecipientType`] or a string literal. String input is validated.
///
/// ```
/// use emailer::{RecipientType, ToRecipientType};
///
/// assert_eq!("cc".to_recipient_type().unwrap(), RecipientType::Cc);
/// assert!("foo".to_recipient_type().is_err());
/// ```
pub trait ToRecipientType {
    fn to_recipient_type(&self) -> Result<RecipientType, ValidationError>;
}

impl<T: ToRecipientType + ?Sized> ToRecipientType for &T {
    fn to_recipient_type(&self) -> Result<RecipientType, ValidationError> {
        (*self).to_recipient_type()
    }
}

impl ToRecipientType for RecipientType {
    fn to_recipient_type(&self) -> Result<RecipientType, ValidationError> {
        Ok(*self)
    }
}

impl ToRecipientType for str {
    fn to_recipient_type(&self) -> Result<RecipientType, ValidationError> {
        self.parse()
    }
}

impl ToRecipientType for String {
    fn to_recipient_type(&self) -> Result<RecipientType, ValidationError> {
        self.parse()
    }
}

/// One recipient entry of an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    /// Addressing type
    #[serde(rename = "type")]
    pub kind: RecipientType,
    /// Name and validated address
    #[serde(flatten)]
    pub address: Address,
}

impl Recipient {
    pub fn name(&self) -> &str {
        &self.address.name
    }

    pub fn email(&self) -> &str {
        &self.address.email
    }

    /// Format as `Name <email>`.
    pub fn formatted(&self) -> String {
        self.address.formatted()
    }
}
