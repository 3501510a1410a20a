use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::state::SharedState;

pub async fn robots_txt(State(state): State<SharedState>) -> impl IntoResponse {
    let body = format!(
        "User-agent: *\nAllow: /\nSitemap: {}/sitemap.xml\n",
        state.config.base_url
    );
    ([(CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

/// Sitemap listing the landing page, the only indexable route.
pub async fn sitemap_xml(State(state): State<SharedState>) -> impl IntoResponse {
    let body = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>{}/</loc>
    <changefreq>weekly</changefreq>
    <priority>1.0</priority>
  </url>
</urlset>
"#,
        state.config.base_url
    );
    ([(CONTENT_TYPE, "application/xml")], body)
}
