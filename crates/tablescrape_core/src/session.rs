use crate::export::{self, ExportError, ExportFormat, ExportPlan, ExportSummary, TableSink};
use crate::{NavigationCursor, SelectionState, SessionError, TableCollection, TabularDataset};

/// One fetch worth of tables together with the user's selection and browse position.
///
/// Selection and cursor always match the collection's size; they are only ever
/// replaced together with it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSession {
    collection: TableCollection,
    selection: SelectionState,
    cursor: NavigationCursor,
}

impl TableSession {
    pub fn new(collection: TableCollection) -> Self {
        let len = collection.len();
        Self {
            collection,
            selection: SelectionState::new(len),
            cursor: NavigationCursor::new(len),
        }
    }

    /// Builds a session straight from parsed tables.
    pub fn from_tables(tables: Vec<TabularDataset>) -> Result<Self, SessionError> {
        TableCollection::build(tables).map(Self::new)
    }

    /// Replaces everything with a fresh collection: all flags cleared, cursor at 0.
    pub fn install(&mut self, collection: TableCollection) {
        *self = Self::new(collection);
    }

    pub fn collection(&self) -> &TableCollection {
        &self.collection
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn table_count(&self) -> usize {
        self.collection.len()
    }

    pub fn position(&self) -> Option<usize> {
        self.cursor.position()
    }

    pub fn current(&self) -> Result<&TabularDataset, SessionError> {
        let index = self.cursor.require_position()?;
        self.collection
            .get(index)
            .ok_or(SessionError::IndexOutOfRange {
                index,
                len: self.collection.len(),
            })
    }

    pub fn step_forward(&mut self) {
        self.cursor.step_forward();
    }

    pub fn step_backward(&mut self) {
        self.cursor.step_backward();
    }

    pub fn can_step_forward(&self) -> bool {
        !self.cursor.at_end()
    }

    pub fn can_step_backward(&self) -> bool {
        !self.cursor.at_start()
    }

    pub fn toggle(&mut self, index: usize) -> Result<bool, SessionError> {
        self.selection.toggle(index)
    }

    pub fn toggle_current(&mut self) -> Result<bool, SessionError> {
        let index = self.cursor.require_position()?;
        self.selection.toggle(index)
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selection.is_selected(index)
    }

    pub fn selected_indices(&self) -> Vec<usize> {
        self.selection.selected_indices()
    }

    /// Output format the current selection would be exported as.
    pub fn export_format(&self) -> Result<ExportFormat, ExportError> {
        ExportPlan::for_selection(&self.selection.selected_indices()).map(|plan| plan.format())
    }

    /// Writes the selected tables through `sink`. The session itself is left untouched.
    pub fn export(&self, sink: &mut dyn TableSink) -> Result<ExportSummary, ExportError> {
        export::export(&self.collection, &self.selection.selected_indices(), sink)
    }
}
