use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::attachments::{MAX_FILE_MB, MAX_TOTAL_MB};
use crate::email::MailError;

#[derive(Debug)]
pub enum QuoteError {
    MissingFields,
    InvalidFileType,
    FileTooLarge { filename: String },
    TotalSizeExceeded,
    Compose(String),
    MailTransport(MailError),
}

impl QuoteError {
    /// True for rejections caused by the submitted data.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, QuoteError::Compose(_) | QuoteError::MailTransport(_))
    }
}

impl std::fmt::Display for QuoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuoteError::MissingFields => write!(f, "Missing required fields"),
            QuoteError::InvalidFileType => write!(f, "Invalid file type. Use JPG/PNG."),
            QuoteError::FileTooLarge { filename } => {
                write!(f, "File {filename} exceeds {MAX_FILE_MB}MB.")
            }
            QuoteError::TotalSizeExceeded => {
                write!(f, "Total attachment size exceeds {MAX_TOTAL_MB}MB.")
            }
            QuoteError::Compose(msg) => write!(f, "{msg}"),
            QuoteError::MailTransport(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for QuoteError {}

impl IntoResponse for QuoteError {
    fn into_response(self) -> Response {
        if self.is_rejection() {
            return (StatusCode::BAD_REQUEST, self.to_string()).into_response();
        }

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "ok": false, "error": self.to_string() })),
        )
            .into_response()
    }
}
