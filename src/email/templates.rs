use askama::Template;

use crate::quote::QuoteSubmission;

#[derive(Template)]
#[template(path = "email/quote.txt")]
struct QuoteText<'a> {
    quote: &'a QuoteSubmission,
    services: String,
}

#[derive(Template)]
#[template(path = "email/quote.html")]
struct QuoteHtml<'a> {
    quote: &'a QuoteSubmission,
    services: String,
}

pub fn render_quote_subject(quote: &QuoteSubmission) -> String {
    format!("[New Quote] {} — {}", quote.full_name, quote.phone)
}

/// Plain-text body. Values are inserted verbatim.
pub fn render_quote_text(quote: &QuoteSubmission) -> Result<String, askama::Error> {
    QuoteText {
        quote,
        services: quote.services_display(),
    }
    .render()
}

/// HTML body. Submitted values are HTML-escaped.
pub fn render_quote_html(quote: &QuoteSubmission) -> Result<String, askama::Error> {
    QuoteHtml {
        quote,
        services: quote.services_display(),
    }
    .render()
}
