//! Key → index registry
//!
//! Indices are positional: inserting or removing one row shifts every row
//! after it. The registry is therefore never patched incrementally; it is
//! rebuilt in full from the flattened sequence after every structural change.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Stable identity of a header or item, independent of its position
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey(Arc<str>);

impl CellKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CellKey {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for CellKey {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Borrow<str> for CellKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Mapping from cell key to its index in the flattened sequence
#[derive(Debug, Default, Clone)]
pub struct KeyRegistry {
    index: FxHashMap<CellKey, usize>,
    /// Keys in sequence order, so index → key is also O(1)
    order: Vec<CellKey>,
}

impl KeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole mapping from `rows`
    ///
    /// Keys are computed in order with `key_fn(row, index)`. When two rows
    /// produce the same key the later one wins; key uniqueness is the
    /// caller's contract.
    pub fn rebuild<'a, R, I, F>(&mut self, rows: I, key_fn: F)
    where
        R: 'a,
        I: IntoIterator<Item = &'a R>,
        F: Fn(&R, usize) -> CellKey,
    {
        let mut index = FxHashMap::default();
        let mut order = Vec::new();
        for (i, row) in rows.into_iter().enumerate() {
            let key = key_fn(row, i);
            index.insert(key.clone(), i);
            order.push(key);
        }
        tracing::trace!(rows = order.len(), "key registry rebuilt");
        self.index = index;
        self.order = order;
    }

    /// Index of `key` in the last rebuilt sequence
    pub fn lookup<Q>(&self, key: &Q) -> Option<usize>
    where
        CellKey: Borrow<Q>,
        Q: std::hash::Hash + Eq + ?Sized,
    {
        self.index.get(key).copied()
    }

    /// Key at `index` in the last rebuilt sequence
    pub fn key_at(&self, index: usize) -> Option<&CellKey> {
        self.order.get(index)
    }

    /// Keys in sequence order
    pub fn keys(&self) -> &[CellKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_of(s: &&str, _: usize) -> CellKey {
        CellKey::from(*s)
    }

    #[test]
    fn test_rebuild_and_lookup() {
        let rows = ["a", "b", "c"];
        let mut registry = KeyRegistry::new();
        registry.rebuild(rows.iter(), key_of);

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup("a"), Some(0));
        assert_eq!(registry.lookup("c"), Some(2));
        assert_eq!(registry.lookup("z"), None);
        assert_eq!(registry.key_at(1).map(CellKey::as_str), Some("b"));
    }

    #[test]
    fn test_rebuild_replaces_previous_mapping() {
        let mut registry = KeyRegistry::new();
        registry.rebuild(["a", "b"].iter(), key_of);
        registry.rebuild(["b", "c"].iter(), key_of);

        assert_eq!(registry.lookup("a"), None);
        assert_eq!(registry.lookup("b"), Some(0));
        assert_eq!(registry.lookup("c"), Some(1));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let mut registry = KeyRegistry::new();
        registry.rebuild(["x", "y", "x"].iter(), key_of);
        assert_eq!(registry.lookup("x"), Some(2));
    }

    #[test]
    fn test_index_dependent_keys() {
        let mut registry = KeyRegistry::new();
        registry.rebuild(["a", "a"].iter(), |row: &&str, i| {
            CellKey::from(format!("{row}-{i}"))
        });
        assert_eq!(registry.lookup("a-0"), Some(0));
        assert_eq!(registry.lookup("a-1"), Some(1));
    }
}
