//! Sectioned data and its flattened form
//!
//! The list renders section headers and items as one interleaved sequence:
//! each section contributes its header followed by its items. The flattened
//! sequence is the single source of truth for index ↔ key mapping.

use rustc_hash::FxHashSet;

use crate::registry::CellKey;

/// One section of caller data: a header and the items under it
#[derive(Debug, Clone, PartialEq)]
pub struct Section<K, T> {
    pub header: K,
    pub data: Vec<T>,
}

impl<K, T> Section<K, T> {
    pub fn new(header: K, data: Vec<T>) -> Self {
        Self { header, data }
    }
}

/// One row of the flattened sequence
#[derive(Debug, Clone, PartialEq)]
pub enum Row<K, T> {
    Header(K),
    Item(T),
}

impl<K, T> Row<K, T> {
    pub fn as_item(&self) -> Option<&T> {
        match self {
            Row::Item(item) => Some(item),
            Row::Header(_) => None,
        }
    }
}

/// Headers and items interleaved in display order
#[derive(Debug, Clone, PartialEq)]
pub struct FlatSequence<K, T> {
    rows: Vec<Row<K, T>>,
}

impl<K, T> Default for FlatSequence<K, T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<K: Clone, T: Clone> FlatSequence<K, T> {
    /// Flatten `sections` into header, items, header, items, ...
    pub fn flatten(sections: &[Section<K, T>]) -> Self {
        let len = sections.iter().map(|s| s.data.len() + 1).sum();
        let mut rows = Vec::with_capacity(len);
        for section in sections {
            rows.push(Row::Header(section.header.clone()));
            rows.extend(section.data.iter().cloned().map(Row::Item));
        }
        Self { rows }
    }
}

impl<K, T> FlatSequence<K, T> {
    pub fn from_rows(rows: Vec<Row<K, T>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row<K, T>> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row<K, T>> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[Row<K, T>] {
        &self.rows
    }

    /// Remove the row at `from` and reinsert it at `to`
    ///
    /// Standard splice semantics: `to` is the row's index after the move.
    /// Out-of-range indices leave the sequence untouched and return false.
    pub fn move_row(&mut self, from: usize, to: usize) -> bool {
        if from >= self.rows.len() || to >= self.rows.len() {
            return false;
        }
        if from != to {
            let row = self.rows.remove(from);
            self.rows.insert(to, row);
        }
        true
    }
}

impl<'a, K, T> IntoIterator for &'a FlatSequence<K, T> {
    type Item = &'a Row<K, T>;
    type IntoIter = std::slice::Iter<'a, Row<K, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Detect a structural change between two versions of sectioned data
///
/// Returns true when the section count differs or the two key sets differ.
/// Order and multiplicity are ignored: a pure reorder is not structural.
pub fn keys_changed<K, T, F>(old: &[Section<K, T>], new: &[Section<K, T>], key_fn: F) -> bool
where
    K: Clone,
    T: Clone,
    F: Fn(&Row<K, T>, usize) -> CellKey,
{
    if old.len() != new.len() {
        return true;
    }

    let collect = |sections: &[Section<K, T>]| -> FxHashSet<CellKey> {
        FlatSequence::flatten(sections)
            .iter()
            .enumerate()
            .map(|(i, row)| key_fn(row, i))
            .collect()
    };

    collect(old) != collect(new)
}
