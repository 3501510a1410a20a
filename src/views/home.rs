use askama::Template;
use axum::response::Html;

use crate::error::AppError;
use crate::quote::attachments::{MAX_FILE_MB, MAX_FILES};

/// Checkbox values offered for the `services` field.
const SERVICES: [&str; 5] = [
    "Pool cleaning",
    "Regular maintenance",
    "Green pool recovery",
    "Equipment repair",
    "Water testing",
];

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    services: &'static [&'static str],
    max_files: usize,
    max_file_mb: usize,
}

pub async fn index() -> Result<Html<String>, AppError> {
    let template = HomeTemplate {
        services: &SERVICES,
        max_files: MAX_FILES,
        max_file_mb: MAX_FILE_MB,
    };
    Ok(Html(template.render()?))
}
