//! Wire types for the query service.
//!
//! `/graphql` answers with the usual `{"data": ..., "errors": [...]}`
//! envelope. `data` is kept as a raw JSON value because its shape depends
//! on the document that was sent: `{"search": {...}}` for a search and
//! `{"b0": {...}, "b1": {...}}` for a lookup by id.

use bizsearch_core::ResultBatch;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// `data` of a search query.
#[derive(Debug, Deserialize)]
pub struct SearchData {
    pub search: ResultBatch,
}
