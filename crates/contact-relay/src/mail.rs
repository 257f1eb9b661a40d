//! Composing the notification email and handing it to a transport.

use crate::config::SmtpCredentials;
use crate::validation::ContactMessage;
use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, Message, SmtpTransport, Transport};

pub const SMTP_HOST: &str = "smtp.gmail.com";
/// Implicit TLS.
pub const SMTP_PORT: u16 = 465;

const SENDER_NAME: &str = "Portfolio Contact";
const RULE_WIDTH: usize = 48;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Invalid address '{0}'")]
    Address(String),

    #[error("Could not build message: {0}")]
    Build(String),

    #[error("SMTP error: {0}")]
    Smtp(String),
}

/// A fully composed notification, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    /// The owner's address, used as both sender and recipient.
    pub owner: String,
    pub reply_name: String,
    pub reply_email: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Escapes `& < > " '` for interpolation into HTML.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

impl OutgoingEmail {
    pub fn compose(owner: &str, contact: &ContactMessage) -> Self {
        let rule = "\u{2500}".repeat(RULE_WIDTH);
        let text = [
            "New message from your portfolio contact form".to_string(),
            rule.clone(),
            String::new(),
            format!("Name:    {}", contact.name),
            format!("Email:   {}", contact.email),
            String::new(),
            "Message:".to_string(),
            contact.message.clone(),
            String::new(),
            rule,
            format!("Reply directly to this email to respond to {}.", contact.name),
        ]
        .join("\n");

        let name = escape_html(&contact.name);
        let email = escape_html(&contact.email);
        let message = escape_html(&contact.message);
        let html = format!(
            r#"<div style="font-family: -apple-system, 'Segoe UI', Roboto, sans-serif; max-width: 600px; margin: 0 auto; background: #0b0f17; color: #e5e7eb; border-radius: 12px;">
  <div style="background: linear-gradient(135deg, #00d4ff 0%, #a855f7 50%, #ec4899 100%); padding: 4px;">
    <div style="background: #111827; padding: 32px; border-radius: 10px;">
      <h2 style="margin: 0 0 8px; font-size: 20px; color: #fff;">New Portfolio Message</h2>
      <p style="margin: 0 0 24px; color: #9ca3af; font-size: 14px;">Someone reached out via your portfolio</p>
      <table style="width: 100%; border-collapse: collapse;">
        <tr><td style="padding: 8px 12px; color: #6b7280;">Name</td><td style="padding: 8px 12px;">{name}</td></tr>
        <tr><td style="padding: 8px 12px; color: #6b7280;">Email</td><td style="padding: 8px 12px;"><a href="mailto:{email}" style="color: #00d4ff;">{email}</a></td></tr>
      </table>
      <div style="margin-top: 20px; padding: 20px; background: #1a2234; border-radius: 8px;">
        <p style="margin: 0 0 8px; color: #9ca3af; font-size: 12px; text-transform: uppercase;">Message</p>
        <p style="margin: 0; font-size: 14px; line-height: 1.7; white-space: pre-wrap;">{message}</p>
      </div>
      <p style="margin-top: 24px; color: #6b7280; font-size: 12px; text-align: center;">Reply directly to this email to respond to {name}</p>
    </div>
  </div>
</div>"#
        );

        Self {
            owner: owner.to_string(),
            reply_name: contact.name.clone(),
            reply_email: contact.email.clone(),
            subject: format!("Portfolio Inquiry from {}", contact.name),
            text,
            html,
        }
    }

    /// Builds the MIME message: plain text and HTML alternatives.
    pub fn to_message(&self) -> Result<Message, MailError> {
        let owner: Address = self.owner.parse().map_err(|_| MailError::Address(self.owner.clone()))?;
        let reply: Address = self
            .reply_email
            .parse()
            .map_err(|_| MailError::Address(self.reply_email.clone()))?;

        Message::builder()
            .from(Mailbox::new(Some(SENDER_NAME.to_string()), owner.clone()))
            .reply_to(Mailbox::new(Some(self.reply_name.clone()), reply))
            .to(Mailbox::new(None, owner))
            .subject(self.subject.clone())
            .multipart(MultiPart::alternative_plain_html(self.text.clone(), self.html.clone()))
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, credentials: &SmtpCredentials, email: &OutgoingEmail) -> Result<(), MailError>;
}

/// Sends through Gmail's SMTP submission endpoint.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    host: String,
}

impl SmtpMailer {
    pub fn new() -> Self {
        Self::with_host(SMTP_HOST)
    }

    pub fn with_host(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }
}

impl Default for SmtpMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, credentials: &SmtpCredentials, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = email.to_message()?;
        let transport = SmtpTransport::relay(&self.host)
            .map_err(|e| MailError::Smtp(e.to_string()))?
            .port(SMTP_PORT)
            .credentials(Credentials::new(credentials.user.clone(), credentials.password.clone()))
            .build();

        // The lettre SMTP client is blocking.
        tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| MailError::Smtp(e.to_string()))?
            .map_err(|e| MailError::Smtp(e.to_string()))?;

        tracing::info!("Forwarded contact message: {}", email.subject);
        Ok(())
    }
}
