use crate::store::{Origin, StateKey, StateStore};
use std::collections::BTreeMap;
use std::convert::Infallible;

/// A store that lives and dies with the process.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MemoryStore {
    entries: BTreeMap<(Origin, StateKey), Vec<u8>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of values held, across all origins.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no values are held.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryStore {
    type Error = Infallible;

    fn get(&self, origin: &Origin, key: &StateKey) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.entries.get(&(*origin, *key)).cloned())
    }

    fn set(&mut self, origin: &Origin, key: &StateKey, value: &[u8]) -> Result<(), Self::Error> {
        let _prev = self.entries.insert((*origin, *key), value.to_vec());
        Ok(())
    }
}
