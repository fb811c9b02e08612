use crate::{SessionError, TabularDataset};

/// The ordered tables produced by one fetch.
///
/// Always holds at least one table; an empty parse result never becomes a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCollection {
    tables: Vec<TabularDataset>,
}

impl TableCollection {
    pub fn build(raw_tables: Vec<TabularDataset>) -> Result<Self, SessionError> {
        if raw_tables.is_empty() {
            return Err(SessionError::EmptyResult);
        }
        Ok(Self { tables: raw_tables })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TabularDataset> {
        self.tables.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TabularDataset> {
        self.tables.iter()
    }
}

impl<'a> IntoIterator for &'a TableCollection {
    type Item = &'a TabularDataset;
    type IntoIter = std::slice::Iter<'a, TabularDataset>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
