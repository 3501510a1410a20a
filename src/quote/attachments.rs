use regex::Regex;
use std::sync::LazyLock;

use super::error::QuoteError;
use super::parser::UploadedFile;
use crate::email::EmailAttachment;

pub const MAX_FILES: usize = 3;
pub const MAX_FILE_MB: usize = 5;
pub const MAX_TOTAL_MB: usize = 12;
pub const MAX_FILE_BYTES: usize = MAX_FILE_MB * 1024 * 1024;
pub const MAX_TOTAL_BYTES: usize = MAX_TOTAL_MB * 1024 * 1024;
pub const ALLOWED_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

const FALLBACK_FILENAME: &str = "photo";

static UNSAFE_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^-\w.]").unwrap());

/// Validate uploaded photos and turn them into email attachments.
///
/// Only the first [`MAX_FILES`] files are considered. The first file with a
/// disallowed type or an oversize body aborts the whole batch.
pub fn collect<'a>(
    files: impl IntoIterator<Item = &'a UploadedFile>,
) -> Result<Vec<EmailAttachment>, QuoteError> {
    let mut total_bytes = 0;
    let mut attachments = Vec::new();

    for file in files.into_iter().take(MAX_FILES) {
        if !ALLOWED_TYPES.contains(&file.content_type.as_str()) {
            return Err(QuoteError::InvalidFileType);
        }
        if file.size > MAX_FILE_BYTES {
            return Err(QuoteError::FileTooLarge {
                filename: file.filename.clone(),
            });
        }

        total_bytes += file.size;
        attachments.push(EmailAttachment {
            filename: sanitize_filename(&file.filename),
            content: file.content.to_vec(),
            content_type: file.content_type.clone(),
        });
    }

    if total_bytes > MAX_TOTAL_BYTES {
        return Err(QuoteError::TotalSizeExceeded);
    }

    Ok(attachments)
}

/// Reduce a client-supplied filename to letters, digits, `_`, `-` and `.`.
pub fn sanitize_filename(name: &str) -> String {
    let underscored = name.trim().replace(' ', "_");
    let cleaned = UNSAFE_FILENAME_RE.replace_all(&underscored, "");

    match cleaned.as_ref() {
        "" | "." | ".." => FALLBACK_FILENAME.to_string(),
        _ => cleaned.into_owned(),
    }
}
