use dpad_layout::{ItemHandle, PivotLayout, SavedLayoutState};

use crate::key::{StateKey, StateMap};

/// Remembers the selection of nested layouts (e.g. the rows of a home screen) by key.
///
/// A row that scrolls out of its parent is recycled along with its layout; saving its state under
/// a stable key and restoring it when the row comes back keeps the user's place in every row.
/// Saving twice under the same key keeps the last state.
#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(
        serialize = "K: serde::Serialize",
        deserialize = "K: serde::Deserialize<'de> + StateKey"
    ))
)]
pub struct ScrollStateRegistry<K> {
    states: StateMap<K, SavedLayoutState>,
}

impl<K: StateKey> Default for ScrollStateRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: StateKey> ScrollStateRegistry<K> {
    pub fn new() -> Self {
        Self {
            states: StateMap::new(),
        }
    }

    /// Saves the current state of `layout` under `key`.
    pub fn save<H: ItemHandle>(&mut self, key: K, layout: &PivotLayout<H>) {
        self.states.insert(key, layout.save_state());
    }

    pub fn insert(&mut self, key: K, state: SavedLayoutState) -> Option<SavedLayoutState> {
        self.states.insert(key, state)
    }

    /// Restores the state saved under `key` into `layout`.
    ///
    /// Returns `false` (leaving `layout` untouched) when nothing was saved for `key`.
    pub fn restore<H: ItemHandle>(&self, key: &K, layout: &mut PivotLayout<H>) -> bool {
        match self.states.get(key) {
            Some(state) => {
                layout.restore_state(state);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &K) -> Option<&SavedLayoutState> {
        self.states.get(key)
    }

    pub fn remove(&mut self, key: &K) -> Option<SavedLayoutState> {
        self.states.remove(key)
    }

    pub fn clear(&mut self) {
        self.states.clear();
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &SavedLayoutState)> + '_ {
        self.states.iter()
    }
}
