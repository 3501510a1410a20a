pub mod templates;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::{SmtpConfig, TlsMode};

/// A fully composed message, ready to hand to a transport.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
    pub attachments: Vec<EmailAttachment>,
}

#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

/// Transport failure. Carries the underlying error text unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct MailError(pub String);

impl std::fmt::Display for MailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for MailError {}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError>;
}

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, String> {
        let builder = match config.tls {
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .map_err(|e| format!("SMTP relay error: {e}"))?,
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host),
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| format!("SMTP starttls error: {e}"))?,
        };

        let builder = builder.port(config.port);
        let transport = match (&config.user, &config.pass) {
            (Some(user), Some(pass)) => builder
                .credentials(Credentials::new(user.clone(), pass.clone()))
                .build(),
            _ => builder.build(),
        };

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        let message = build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError(e.to_string()))?;

        Ok(())
    }
}

/// Writes messages to the log instead of delivering them. Used when no SMTP
/// host is configured.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), MailError> {
        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            attachments = email.attachments.len(),
            "SMTP not configured, email not delivered\n{}",
            email.text_body
        );
        Ok(())
    }
}

/// Build a `multipart/mixed` message: text and HTML as alternatives, then
/// each attachment with its declared media type.
pub fn build_message(email: OutboundEmail) -> Result<Message, MailError> {
    let mut body = MultiPart::mixed()
        .multipart(MultiPart::alternative_plain_html(email.text_body, email.html_body));

    for attachment in email.attachments {
        let content_type = ContentType::parse(&attachment.content_type).map_err(|e| {
            MailError(format!("Invalid attachment type {}: {e}", attachment.content_type))
        })?;
        body = body.singlepart(
            Attachment::new(attachment.filename).body(attachment.content, content_type),
        );
    }

    Message::builder()
        .from(
            email
                .from
                .parse()
                .map_err(|e| MailError(format!("Invalid from address: {e}")))?,
        )
        .to(email
            .to
            .parse()
            .map_err(|e| MailError(format!("Invalid to address: {e}")))?)
        .subject(email.subject)
        .multipart(body)
        .map_err(|e| MailError(format!("Failed to build email: {e}")))
}
