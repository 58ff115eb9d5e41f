//! Deduplication of recurring text fragments.

use std::collections::HashMap;

use crate::svg::Element;

/// Interns serialized fragments and hands out stable reference ids.
///
/// Definitions created while a bucket is being composed stay pending until
/// [`DefinitionStore::commit`] merges them into the persisted table; lookups
/// see both, and the id counter spans both so ids never collide.
#[derive(Debug, Default)]
pub struct DefinitionStore {
    persisted: HashMap<String, String>,
    pending: HashMap<String, String>,
    pending_elements: Vec<Element>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the definition whose content is byte-identical to `fragment`,
    /// registering `fragment` under a fresh id if there is none.
    pub fn intern(&mut self, mut fragment: Element) -> String {
        let content = fragment.to_xml();

        if let Some(id) = self
            .persisted
            .get(&content)
            .or_else(|| self.pending.get(&content))
        {
            return id.clone();
        }

        let id = format!("g{}", self.len() + 1);
        fragment.set_attr("id", id.as_str());
        self.pending.insert(content, id.clone());
        self.pending_elements.push(fragment);
        id
    }

    /// Merge pending definitions into the persisted table and return their
    /// elements, in creation order.
    pub fn commit(&mut self) -> Vec<Element> {
        self.persisted.extend(self.pending.drain());
        std::mem::take(&mut self.pending_elements)
    }

    /// Total number of definitions, pending ones included.
    pub fn len(&self) -> usize {
        self.persisted.len() + self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
