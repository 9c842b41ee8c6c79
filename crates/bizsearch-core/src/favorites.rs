use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One row of the favorites store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub business_id: String,
}

/// Snapshot of favorited business ids.
///
/// The persistent store is the source of truth. A set is never patched in
/// place: after every add or remove the caller reloads the store and builds
/// a fresh set with [`FavoritesSet::load`].
#[derive(Debug, Clone, Default)]
pub struct FavoritesSet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl FavoritesSet {
    /// Builds a set from store records, keeping the first occurrence of each id.
    #[must_use]
    pub fn load<'a>(records: impl IntoIterator<Item = &'a FavoriteRecord>) -> Self {
        let mut set = Self::default();
        for record in records {
            if set.members.insert(record.business_id.clone()) {
                set.ordered.push(record.business_id.clone());
            }
        }
        set
    }

    #[must_use]
    pub fn has(&self, id: &str) -> bool {
        self.members.contains(id)
    }

    /// Exports ids in load order.
    #[must_use]
    pub fn to_list(&self) -> Vec<String> {
        self.ordered.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
