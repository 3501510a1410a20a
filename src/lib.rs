pub mod config;
pub mod email;
pub mod error;
pub mod quote;
pub mod routes;
pub mod state;
pub mod views;

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::email::{LogMailer, Mailer, SmtpMailer};
use crate::state::{AppState, SharedState};

/// Pick the mail transport for `config`: SMTP when configured, the log
/// otherwise.
pub fn build_mailer(config: &Config) -> Result<Arc<dyn Mailer>, String> {
    match &config.smtp {
        Some(smtp) => {
            let mailer = SmtpMailer::new(smtp)?;
            tracing::info!(host = %smtp.host, port = smtp.port, "SMTP configured");
            Ok(Arc::new(mailer))
        }
        None => {
            tracing::warn!("SMTP not configured, quote emails will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

pub fn build_app(config: Config, mailer: Arc<dyn Mailer>) -> Router {
    let state: SharedState = Arc::new(AppState { config, mailer });

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        let uri = request.uri().to_string();
        tracing::info_span!("http_request", method = ?request.method(), uri)
    });

    // Security headers
    let headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    Router::new()
        .merge(routes::api_routes())
        .merge(views::view_routes())
        .nest_service("/static", ServeDir::new("static"))
        .route("/health", axum::routing::get(health))
        .layer(headers)
        .layer(trace_layer)
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
