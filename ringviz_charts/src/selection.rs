// Copyright 2025 the ringviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-value selection shared by slices and legend rows.

use ringviz_data::SelectionKey;

/// Opacity of selected items, and of everything when nothing is selected.
pub const SELECTED_OPACITY: f64 = 1.0;
/// Opacity of items other than the selected one.
pub const DIMMED_OPACITY: f64 = 0.5;

/// The current selection.
///
/// Slice clicks, legend row clicks and background clicks all write here; every opacity is derived
/// from this one value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<SelectionKey>,
}

impl SelectionState {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles `key`: selecting the selected key clears the selection.
    ///
    /// Returns `true` when `key` is selected afterwards.
    pub fn select(&mut self, key: &SelectionKey) -> bool {
        if self.selected.as_ref() == Some(key) {
            self.selected = None;
            false
        } else {
            self.selected = Some(key.clone());
            true
        }
    }

    /// Clears the selection (background click).
    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The selected key.
    pub fn selected(&self) -> Option<&SelectionKey> {
        self.selected.as_ref()
    }

    /// Whether `key` is selected.
    pub fn is_selected(&self, key: &SelectionKey) -> bool {
        self.selected.as_ref() == Some(key)
    }

    /// Opacity of the item identified by `key`.
    pub fn opacity(&self, key: &SelectionKey) -> f64 {
        match &self.selected {
            None => SELECTED_OPACITY,
            Some(selected) if selected == key => SELECTED_OPACITY,
            Some(_) => DIMMED_OPACITY,
        }
    }

    /// Drops the selection unless its key is among `keys`.
    pub fn retain_existing<'a>(&mut self, mut keys: impl Iterator<Item = &'a SelectionKey>) {
        if let Some(selected) = &self.selected
            && !keys.any(|k| k == selected)
        {
            log::debug!("selection: {selected:?} no longer exists, clearing");
            self.selected = None;
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use super::*;

    fn key(row: usize, category: &str) -> SelectionKey {
        SelectionKey {
            row,
            category: Arc::from(category),
        }
    }

    #[test]
    fn nothing_selected_is_fully_opaque() {
        let s = SelectionState::new();
        assert_eq!(s.opacity(&key(0, "A")), SELECTED_OPACITY);
    }

    #[test]
    fn selecting_dims_the_others() {
        let mut s = SelectionState::new();
        assert!(s.select(&key(1, "B")));
        assert_eq!(s.opacity(&key(1, "B")), SELECTED_OPACITY);
        assert_eq!(s.opacity(&key(0, "A")), DIMMED_OPACITY);
    }

    #[test]
    fn selecting_twice_toggles_off() {
        let mut s = SelectionState::new();
        s.select(&key(1, "B"));
        assert!(!s.select(&key(1, "B")));
        assert_eq!(s.selected(), None);
    }

    #[test]
    fn background_click_clears() {
        let mut s = SelectionState::new();
        s.select(&key(1, "B"));
        s.clear();
        assert!(!s.is_selected(&key(1, "B")));
    }

    #[test]
    fn selection_survives_only_existing_keys() {
        let mut s = SelectionState::new();
        s.select(&key(1, "B"));
        let keys: Vec<SelectionKey> = [key(0, "A"), key(1, "B")].into();
        s.retain_existing(keys.iter());
        assert!(s.is_selected(&key(1, "B")));

        let keys: Vec<SelectionKey> = [key(0, "A"), key(1, "C")].into();
        s.retain_existing(keys.iter());
        assert_eq!(s.selected(), None);
    }
}
