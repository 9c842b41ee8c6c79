//! GraphQL documents sent to the query service.
//!
//! Both documents select the same business fields through the
//! `bizResponse` fragment, so either response deserializes into
//! [`bizsearch_core::Business`].

use std::fmt::Write as _;

use bizsearch_core::SearchParams;
use serde::Serialize;
use serde_json::{json, Map, Value};

const BIZ_RESPONSE_FRAGMENT: &str = "fragment bizResponse on Business { \
id name url distance photos location { city zip_code } categories { title alias } }";

const SEARCH_DOCUMENT: &str = "query search($limit: Int!, $offset: Int!, $zip_code: String!, \
$radius: Float!, $categories: String) { search(limit: $limit, offset: $offset, \
location: $zip_code, radius: $radius, categories: $categories) { total business { ...bizResponse } } }";

/// A GraphQL request body: `{"query": ..., "variables": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryObject {
    pub query: String,
    pub variables: Map<String, Value>,
}

/// Builds the business search document for `params`.
#[must_use]
pub fn search_query(params: &SearchParams) -> QueryObject {
    let mut variables = Map::new();
    variables.insert("limit".to_string(), json!(params.limit));
    variables.insert("offset".to_string(), json!(params.offset));
    variables.insert("zip_code".to_string(), json!(params.zip_code));
    variables.insert("radius".to_string(), json!(params.radius_meters));
    variables.insert("categories".to_string(), json!(params.category));

    QueryObject {
        query: format!("{SEARCH_DOCUMENT} {BIZ_RESPONSE_FRAGMENT}"),
        variables,
    }
}

/// Builds one aliased `business(id:)` lookup per id: `b0`, `b1`, ...
///
/// The alias index is the position in `ids`; the response is put back in
/// that order by [`crate::normalize::favorites_batch`].
#[must_use]
pub fn favorites_query(ids: &[String]) -> QueryObject {
    let mut declarations = Vec::with_capacity(ids.len());
    let mut selections = String::new();
    let mut variables = Map::new();

    for (i, id) in ids.iter().enumerate() {
        declarations.push(format!("$id{i}: String!"));
        let _ = write!(selections, "b{i}: business(id: $id{i}) {{ ...bizResponse }} ");
        variables.insert(format!("id{i}"), Value::String(id.clone()));
    }

    QueryObject {
        query: format!(
            "query favorites({}) {{ {}}} {BIZ_RESPONSE_FRAGMENT}",
            declarations.join(", "),
            selections
        ),
        variables,
    }
}
