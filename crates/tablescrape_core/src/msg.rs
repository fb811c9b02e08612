use std::path::PathBuf;

use crate::{ExportSummary, TabularDataset};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the URL input.
    InputChanged(String),
    /// User asked to fetch the tables of the current URL input.
    FetchClicked,
    /// Fetch finished: parsed tables (possibly none) or a user-facing error.
    TablesFetched(Result<Vec<TabularDataset>, String>),
    /// User clicked "Next >>".
    NextClicked,
    /// User clicked "<< Previous".
    PreviousClicked,
    /// User flipped the checkbox of the table at `index`.
    ToggleClicked { index: usize },
    /// User flipped the checkbox of the table being shown.
    ToggleCurrentClicked,
    /// User clicked "Export Selected Tables".
    ExportClicked,
    /// Destination prompt closed; `None` when the user cancelled.
    ExportDestinationChosen(Option<PathBuf>),
    /// Export write finished.
    ExportFinished(Result<ExportSummary, String>),
}
