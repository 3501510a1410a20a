use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::quote::{parser, pipeline};
use crate::state::SharedState;

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<Value>, Response> {
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

    let form = parser::parse_form(
        content_type,
        body.into_data_stream(),
        state.config.max_body_size,
    )
    .await
    .map_err(|e| AppError::BadRequest(e).into_response())?;

    match pipeline::run(&state.config, state.mailer.as_ref(), &form).await {
        Ok(()) => {
            tracing::info!(to = %state.config.quote_recipient(), "Quote request sent");
            Ok(Json(json!({ "ok": true })))
        }
        Err(e) if e.is_rejection() => {
            tracing::warn!("Quote request rejected: {e}");
            Err(e.into_response())
        }
        Err(e) => {
            tracing::error!("Quote request failed: {e}");
            Err(e.into_response())
        }
    }
}
