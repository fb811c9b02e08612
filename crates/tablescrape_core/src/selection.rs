use crate::SessionError;

/// Per-table "include in export" flags, one per table in the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    flags: Vec<bool>,
}

impl SelectionState {
    /// All flags start cleared.
    pub fn new(len: usize) -> Self {
        Self {
            flags: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Flips the flag at `index` and returns its new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool, SessionError> {
        let len = self.flags.len();
        let flag = self
            .flags
            .get_mut(index)
            .ok_or(SessionError::IndexOutOfRange { index, len })?;
        *flag = !*flag;
        Ok(*flag)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Selected indices in ascending order.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.flags
            .iter()
            .enumerate()
            .filter_map(|(index, selected)| selected.then_some(index))
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.flags.iter().filter(|selected| **selected).count()
    }
}
