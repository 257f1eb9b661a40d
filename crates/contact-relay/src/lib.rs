//! # folio-contact-relay
//!
//! A single endpoint, `POST /api/send-email`, that validates a contact form
//! submission and forwards it to the portfolio owner's inbox.
//!
//! - **config**: credentials and listen address from the environment
//! - **validation**: field checks with every failure reported at once
//! - **mail**: message composition and the SMTP transport
//! - **routes**: the axum router with CORS and request tracing

pub mod config;
pub mod error;
pub mod mail;
pub mod routes;
pub mod validation;

pub use config::{RelayConfig, SmtpCredentials};
pub use error::{RelayError, Result};
pub use mail::{MailError, Mailer, OutgoingEmail, SmtpMailer};
pub use routes::{AppState, router};
pub use validation::{ContactMessage, validate};
