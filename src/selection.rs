use indexmap::IndexMap;

use crate::record::RecordId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Deselected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionEntry {
    pub id: RecordId,
    /// Index of the record in the loaded dataset.
    pub record: usize,
}

/// Ordered set of selected records, most recently selected first.
#[derive(Clone, Debug, Default)]
pub struct SelectionStore {
    entries: IndexMap<RecordId, usize>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `id` if present, otherwise inserts it at the front.
    pub fn toggle(&mut self, id: RecordId, record: usize) -> SelectionChange {
        if self.entries.shift_remove(&id).is_some() {
            SelectionChange::Deselected
        } else {
            self.entries.shift_insert(0, id, record);
            SelectionChange::Selected
        }
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl Iterator<Item = SelectionEntry> + '_ {
        self.entries
            .iter()
            .map(|(&id, &record)| SelectionEntry { id, record })
    }

    pub fn ids(&self) -> Vec<RecordId> {
        self.entries.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[u64]) -> Vec<RecordId> {
        values.iter().copied().map(RecordId).collect()
    }

    #[test]
    fn newest_selection_comes_first() {
        let mut store = SelectionStore::new();

        assert_eq!(store.toggle(RecordId(1), 0), SelectionChange::Selected);
        assert_eq!(store.toggle(RecordId(2), 1), SelectionChange::Selected);
        assert_eq!(store.ids(), ids(&[2, 1]));

        assert_eq!(store.toggle(RecordId(2), 1), SelectionChange::Deselected);
        assert_eq!(store.ids(), ids(&[1]));
    }

    #[test]
    fn double_toggle_restores_set_and_order() {
        let mut store = SelectionStore::new();
        for (record, id) in [3, 8, 5].into_iter().enumerate() {
            store.toggle(RecordId(id), record);
        }
        let before = store.ids();

        store.toggle(RecordId(42), 7);
        store.toggle(RecordId(42), 7);
        assert_eq!(store.ids(), before);

        store.toggle(RecordId(8), 1);
        store.toggle(RecordId(8), 1);
        assert_eq!(store.len(), 3);
        assert_eq!(store.ids(), ids(&[8, 5, 3]));
    }

    #[test]
    fn removing_from_the_middle_keeps_remaining_order() {
        let mut store = SelectionStore::new();
        for (record, id) in [1, 2, 3, 4].into_iter().enumerate() {
            store.toggle(RecordId(id), record);
        }

        store.toggle(RecordId(3), 2);

        assert_eq!(store.ids(), ids(&[4, 2, 1]));
        let entries = store.entries().collect::<Vec<_>>();
        assert_eq!(
            entries[1],
            SelectionEntry {
                id: RecordId(2),
                record: 1
            }
        );
    }

    #[test]
    fn never_holds_duplicate_ids() {
        let mut store = SelectionStore::new();
        for _ in 0..5 {
            store.toggle(RecordId(9), 0);
        }

        assert_eq!(store.len(), 1);
        assert!(store.contains(RecordId(9)));
        store.clear();
        assert!(store.is_empty());
    }
}
