use super::NodeId;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Memoized name lookups. Only names are cached, never match results.
#[derive(Debug, Default)]
pub(super) struct LookupCache {
    map: RwLock<HashMap<Box<str>, NodeId>>,
}

impl LookupCache {
    pub(super) fn get(&self, name: &str) -> Option<NodeId> {
        let map = self.map.read().unwrap_or_else(PoisonError::into_inner);
        map.get(name).copied()
    }

    pub(super) fn insert(&self, name: &str, id: NodeId) {
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(name.into(), id);
    }

    /// Called by every mutation of the tree.
    pub(super) fn clear(&mut self) {
        self.map
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub(super) fn len(&self) -> usize {
        self.map.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
