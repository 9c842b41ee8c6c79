//! Handlers that forward to the upstream API with the server-held key.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Extension, Json,
};
use bizsearch_core::CategoryRecord;

use super::{map_upstream_error, ApiError, AppState};
use crate::middleware::RequestId;

const DEFAULT_LOCALE: &str = "en_US";

fn locale(headers: &HeaderMap) -> &str {
    headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_LOCALE)
}

/// `GET /categories`: the upstream list flattened to `[{alias, title}]`.
pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
) -> Result<Json<Vec<CategoryRecord>>, ApiError> {
    let categories = state
        .upstream
        .fetch_categories(locale(&headers))
        .await
        .map_err(|e| map_upstream_error(req_id.0, &e))?;
    tracing::debug!(count = categories.len(), "served categories");
    Ok(Json(categories))
}

/// `POST /graphql`: forwards the body and relays the upstream status and body.
pub(super) async fn graphql(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let (status, upstream_body) = state
        .upstream
        .forward_graphql(body, locale(&headers))
        .await
        .map_err(|e| map_upstream_error(req_id.0, &e))?;

    if !status.is_success() {
        tracing::warn!(status = status.as_u16(), "upstream graphql returned non-success");
    }
    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        upstream_body,
    )
        .into_response())
}
