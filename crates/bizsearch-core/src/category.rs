//! Category autosuggest index.
//!
//! Categories are keyed by their *normalized* title: every character outside
//! `[A-Za-z0-9]` is removed and the remainder lowercased, so `"Bagels & Bakeries"`
//! is stored under `"bagelsbakeries"`. The index is a byte trie over those
//! keys, built once per category load and never mutated afterwards.
//!
//! Lookups walk to the node for the normalized query and collect entries
//! depth-first: entries stored exactly at a node come before entries below
//! it, sibling branches are visited in the order they were first created, and
//! entries sharing one key keep their insertion order.

use serde::{Deserialize, Serialize};

use crate::constants::CAT_SEARCH_LIMIT;

/// Category as served by the `/categories` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub alias: String,
    pub title: String,
}

/// A category with its precomputed search key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub alias: String,
    pub title: String,
    pub normalized: String,
}

impl From<CategoryRecord> for Category {
    fn from(record: CategoryRecord) -> Self {
        let normalized = normalize_title(&record.title);
        Self {
            alias: record.alias,
            title: record.title,
            normalized,
        }
    }
}

/// Strips every non-`[A-Za-z0-9]` character and lowercases the rest.
///
/// Idempotent: `normalize_title(&normalize_title(t)) == normalize_title(t)`.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Default)]
struct TrieNode {
    /// `(byte, node index)` in first-insertion order.
    children: Vec<(u8, usize)>,
    /// Indices into `CategoryIndex::categories` whose key ends here.
    entries: Vec<usize>,
}

/// Prefix-search index over normalized category titles.
#[derive(Debug)]
pub struct CategoryIndex {
    categories: Vec<Category>,
    nodes: Vec<TrieNode>,
}

impl CategoryIndex {
    /// Builds the index from raw category records.
    ///
    /// No deduplication is performed: two records normalizing to the same key
    /// are both retrievable under it.
    #[must_use]
    pub fn build(records: impl IntoIterator<Item = CategoryRecord>) -> Self {
        let mut index = Self {
            categories: Vec::new(),
            nodes: vec![TrieNode::default()],
        };
        for record in records {
            index.insert(Category::from(record));
        }
        index
    }

    fn insert(&mut self, category: Category) {
        let mut node = 0;
        for byte in category.normalized.bytes() {
            node = match self.child(node, byte) {
                Some(next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.push((byte, next));
                    next
                }
            };
        }
        let entry = self.categories.len();
        self.categories.push(category);
        self.nodes[node].entries.push(entry);
    }

    fn child(&self, node: usize, byte: u8) -> Option<usize> {
        self.nodes[node]
            .children
            .iter()
            .find(|(b, _)| *b == byte)
            .map(|&(_, idx)| idx)
    }

    /// Number of categories held, duplicates included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Returns up to `limit` categories whose normalized title starts with the
    /// normalized `query`.
    ///
    /// A query that normalizes to the empty string matches nothing.
    #[must_use]
    pub fn prefix_search(&self, query: &str, limit: usize) -> Vec<&Category> {
        let key = normalize_title(query);
        if key.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut node = 0;
        for byte in key.bytes() {
            match self.child(node, byte) {
                Some(next) => node = next,
                None => return Vec::new(),
            }
        }

        let mut out = Vec::new();
        self.collect(node, limit, &mut out);
        out
    }

    fn collect<'a>(&'a self, node: usize, limit: usize, out: &mut Vec<&'a Category>) {
        for &entry in &self.nodes[node].entries {
            if out.len() >= limit {
                return;
            }
            out.push(&self.categories[entry]);
        }
        for &(_, child) in &self.nodes[node].children {
            if out.len() >= limit {
                return;
            }
            self.collect(child, limit, out);
        }
    }

    /// Autosuggest lookup capped at [`CAT_SEARCH_LIMIT`].
    #[must_use]
    pub fn suggest(&self, query: &str) -> Vec<&Category> {
        self.prefix_search(query, CAT_SEARCH_LIMIT)
    }

    /// Resolves typed text to a single canonical category.
    ///
    /// Returns `Some` only when the prefix search has exactly one hit *and*
    /// that hit's normalized title equals the normalized query. A lone
    /// proper-prefix hit ("thai" typed, only "Thai Food" indexed) is `None`.
    #[must_use]
    pub fn exact_single_match(&self, query: &str) -> Option<&Category> {
        let hits = self.prefix_search(query, 2);
        match hits.as_slice() {
            [only] if only.normalized == normalize_title(query) => Some(*only),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "category_test.rs"]
mod tests;
