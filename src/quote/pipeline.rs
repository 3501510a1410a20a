use super::attachments;
use super::error::QuoteError;
use super::fields::QuoteSubmission;
use super::parser::FormData;
use crate::config::Config;
use crate::email::templates;
use crate::email::{EmailAttachment, Mailer, OutboundEmail};

/// Form field carrying the uploaded photos.
pub const PHOTOS_FIELD: &str = "photos";

/// Validate a quote form, compose the email and hand it to the mailer.
///
/// Validation failures return before anything is composed. Transport errors
/// are returned as [`QuoteError::MailTransport`] and never retried.
pub async fn run(config: &Config, mailer: &dyn Mailer, form: &FormData) -> Result<(), QuoteError> {
    let quote = QuoteSubmission::from_form(form)?;
    let attachments = attachments::collect(form.files_named(PHOTOS_FIELD))?;

    let email = compose(config, &quote, attachments)?;

    mailer.send(email).await.map_err(QuoteError::MailTransport)
}

pub fn compose(
    config: &Config,
    quote: &QuoteSubmission,
    attachments: Vec<EmailAttachment>,
) -> Result<OutboundEmail, QuoteError> {
    let text_body = templates::render_quote_text(quote)
        .map_err(|e| QuoteError::Compose(format!("Failed to render email: {e}")))?;
    let html_body = templates::render_quote_html(quote)
        .map_err(|e| QuoteError::Compose(format!("Failed to render email: {e}")))?;

    Ok(OutboundEmail {
        from: config.default_from_email.clone(),
        to: config.quote_recipient().to_string(),
        subject: templates::render_quote_subject(quote),
        text_body,
        html_body,
        attachments,
    })
}
