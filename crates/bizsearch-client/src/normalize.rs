//! Normalization of query-service responses into [`ResultBatch`].

use bizsearch_core::{Business, ResultBatch};
use serde_json::{Map, Value};

use crate::error::ClientError;

/// Converts the keyed `{"b0": ..., "b1": ...}` lookup response into a batch.
///
/// Entries are ordered by their numeric alias index, not by key string, so
/// `b10` follows `b9`. `null` entries (ids the service no longer knows) and
/// keys that are not lookup aliases are skipped. `total` is the number of ids
/// that were requested.
///
/// # Errors
///
/// Returns [`ClientError::Deserialize`] if an entry is not a business.
pub fn favorites_batch(data: Map<String, Value>, requested: usize) -> Result<ResultBatch, ClientError> {
    let mut keyed: Vec<(usize, Value)> = data
        .into_iter()
        .filter_map(|(key, value)| {
            let index = key.strip_prefix('b')?.parse::<usize>().ok()?;
            Some((index, value))
        })
        .filter(|(_, value)| !value.is_null())
        .collect();
    keyed.sort_by_key(|(index, _)| *index);

    let business = keyed
        .into_iter()
        .map(|(index, value)| {
            serde_json::from_value::<Business>(value).map_err(|e| ClientError::Deserialize {
                context: format!("favorites(b{index})"),
                source: e,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResultBatch {
        total: u32::try_from(requested).unwrap_or(u32::MAX),
        business,
    })
}
