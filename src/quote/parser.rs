use std::error::Error as StdError;

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};

use super::attachments::{MAX_FILES, MAX_FILE_BYTES};

/// Cap on non-file form data held in memory, summed over all text fields.
pub const MAX_FORM_MEMORY_BYTES: usize = 2_621_440;

/// Decoded form body. Repeated keys keep their submission order.
#[derive(Debug, Clone, Default)]
pub struct FormData {
    pub fields: Vec<(String, String)>,
    pub files: Vec<UploadedFile>,
}

/// An uploaded file part. `size` is the length that was sent; `content` is
/// cut short once it passes [`MAX_FILE_BYTES`].
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub field: String,
    pub filename: String,
    pub content_type: String,
    pub size: usize,
    pub content: Bytes,
}

impl FormData {
    pub fn push_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    pub fn push_file(&mut self, file: UploadedFile) {
        self.files.push(file);
    }

    /// Last value submitted under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn files_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a UploadedFile> {
        self.files.iter().filter(move |f| f.field == name)
    }
}

/// Parse a streamed request body based on Content-Type header.
///
/// `max_body_size` bounds the bytes read from the stream. Memory is bounded
/// separately: text fields share [`MAX_FORM_MEMORY_BYTES`], each file keeps at
/// most one byte past [`MAX_FILE_BYTES`], and file parts past the first
/// [`MAX_FILES`] of a field are read and discarded.
pub async fn parse_form<S, E>(
    content_type: Option<&str>,
    body: S,
    max_body_size: usize,
) -> Result<FormData, String>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<Box<dyn StdError + Send + Sync>> + 'static,
{
    match content_type {
        Some(ct) if is_multipart(ct) => parse_multipart(ct, body, max_body_size).await,
        _ => {
            let body = collect_capped(body, MAX_FORM_MEMORY_BYTES).await?;
            parse_form_urlencoded(&body)
        }
    }
}

fn is_multipart(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("multipart/form-data"))
}

async fn collect_capped<S, E>(body: S, limit: usize) -> Result<Bytes, String>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    let mut body = std::pin::pin!(body);
    let mut buf = BytesMut::new();
    while let Some(chunk) = body.next().await {
        let chunk = chunk.map_err(|e| {
            let e: Box<dyn StdError + Send + Sync> = e.into();
            format!("Body read error: {e}")
        })?;
        if buf.len() + chunk.len() > limit {
            return Err("Request body too large".to_string());
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

fn parse_form_urlencoded(body: &[u8]) -> Result<FormData, String> {
    let body_str = std::str::from_utf8(body).map_err(|e| format!("Invalid UTF-8: {e}"))?;

    let mut form = FormData::default();
    for (k, v) in form_urlencoded::parse(body_str.as_bytes()) {
        form.push_field(k.into_owned(), v.into_owned());
    }
    Ok(form)
}

/// Parse multipart form data using multer, one chunk at a time.
async fn parse_multipart<S, E>(
    content_type: &str,
    body: S,
    max_body_size: usize,
) -> Result<FormData, String>
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<Box<dyn StdError + Send + Sync>> + 'static,
{
    let boundary =
        multer::parse_boundary(content_type).map_err(|_| "Missing multipart boundary".to_string())?;

    let constraints = multer::Constraints::new()
        .size_limit(multer::SizeLimit::new().whole_stream(max_body_size as u64));
    let mut multipart = multer::Multipart::with_constraints(body, boundary, constraints);

    let mut form = FormData::default();
    let mut text_bytes = 0;
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| format!("Multipart error: {e}"))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(str::to_string);

        let Some(filename) = filename else {
            let budget = MAX_FORM_MEMORY_BYTES - text_bytes;
            let (value, size) = read_capped(&mut field, budget).await?;
            if size > budget {
                return Err("Request body too large".to_string());
            }
            text_bytes += size;
            let value =
                String::from_utf8(value.to_vec()).map_err(|e| format!("Invalid UTF-8: {e}"))?;
            form.push_field(name, value);
            continue;
        };

        // An unselected file input still sends a part, with an empty filename.
        if filename.is_empty() || form.files_named(&name).count() >= MAX_FILES {
            read_capped(&mut field, 0).await?;
            continue;
        }

        let content_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let (content, size) = read_capped(&mut field, MAX_FILE_BYTES + 1).await?;

        form.push_file(UploadedFile {
            field: name,
            filename,
            content_type,
            size,
            content,
        });
    }

    Ok(form)
}

/// Read a field to the end, keeping at most `keep` bytes. Returns the kept
/// bytes and the full length of the field.
async fn read_capped(field: &mut multer::Field<'_>, keep: usize) -> Result<(Bytes, usize), String> {
    let mut kept = BytesMut::new();
    let mut size = 0;
    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| format!("Field read error: {e}"))?
    {
        size += chunk.len();
        let room = keep.saturating_sub(kept.len()).min(chunk.len());
        kept.extend_from_slice(&chunk[..room]);
    }
    Ok((kept.freeze(), size))
}
