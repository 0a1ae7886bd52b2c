//! Service adapter implementations.
//!
//! Each adapter implements the [`ServiceAdapter`](crate::ServiceAdapter) trait.
//!
//! ## Available Adapters
//!
//! | Adapter | Feature Flag | Description |
//! |---------|-------------|-------------|
//! | [`MailgunAdapter`] | (none) | Mailgun payload builder over a [`MailgunClient`] |
//! | [`HttpMailgunClient`] | `mailgun` | Mailgun messages API over HTTP |
//! | [`LoggerAdapter`] | (none) | Logs emails without sending |
//! | [`MemoryAdapter`] | (none) | Records emails in memory for tests |

mod mailgun;
#[cfg(feature = "mailgun")]
pub use mailgun::HttpMailgunClient;
pub use mailgun::{MailgunAdapter, MailgunClient, Payload, PayloadInspector};

mod logger;
pub use logger::LoggerAdapter;

mod memory;
pub use memory::MemoryAdapter;
