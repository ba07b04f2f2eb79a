//! Collection: the normalized working set of excerpts.
//!
//! Display order lives in `ids`; content lives in `entities`. Every public
//! operation keeps the two in step: the id sequence holds no duplicates and
//! its members are exactly the map's keys.
//!
//! Order is ascending by id after [`Collection::replace_all`]. Newly created
//! excerpts go to the front through [`Collection::insert_front`], so a
//! collection that has seen creates since its last refresh is no longer
//! sorted.

use crate::types::{Excerpt, ExcerptId};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    ids: Vec<ExcerptId>,
    entities: HashMap<ExcerptId, Excerpt>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from records, sorted ascending by id.
    pub fn from_records(records: impl IntoIterator<Item = Excerpt>) -> Self {
        let mut collection = Self::new();
        collection.replace_all(records);
        collection
    }

    /// Throw away the current contents and rebuild from `records`.
    ///
    /// If `records` repeats an id, the last record wins and the id appears
    /// once.
    pub fn replace_all(&mut self, records: impl IntoIterator<Item = Excerpt>) {
        self.entities.clear();
        for record in records {
            self.entities.insert(record.id, record);
        }
        self.ids = self.entities.keys().copied().collect();
        self.ids.sort_unstable();
    }

    /// Put a new excerpt at the front of the display order.
    ///
    /// If the id is already present the content is overwritten where it
    /// stands. Returns `true` when the id was new.
    pub fn insert_front(&mut self, record: Excerpt) -> bool {
        let id = record.id;
        match self.entities.insert(id, record) {
            Some(_) => false,
            None => {
                self.ids.insert(0, id);
                true
            }
        }
    }

    /// Overwrite an excerpt's content without moving it.
    ///
    /// An id the collection has never seen is appended to the end. Returns
    /// `true` when the id was already present.
    pub fn upsert(&mut self, record: Excerpt) -> bool {
        let id = record.id;
        match self.entities.insert(id, record) {
            Some(_) => true,
            None => {
                self.ids.push(id);
                false
            }
        }
    }

    /// Drop an excerpt from both the order and the map. Absent ids are ignored.
    pub fn remove(&mut self, id: ExcerptId) -> Option<Excerpt> {
        let removed = self.entities.remove(&id)?;
        self.ids.retain(|existing| *existing != id);
        Some(removed)
    }

    pub fn get(&self, id: ExcerptId) -> Option<&Excerpt> {
        self.entities.get(&id)
    }

    /// Ids in display order.
    pub fn ids(&self) -> &[ExcerptId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Excerpts in display order.
    pub fn iter(&self) -> impl Iterator<Item = &Excerpt> + '_ {
        self.ids.iter().filter_map(|id| self.entities.get(id))
    }

    /// Check the normalization invariants. Used by tests and debug assertions.
    pub fn is_consistent(&self) -> bool {
        if self.ids.len() != self.entities.len() {
            return false;
        }
        let mut seen = std::collections::HashSet::with_capacity(self.ids.len());
        self.ids
            .iter()
            .all(|id| seen.insert(*id) && self.entities.contains_key(id))
    }
}
