use std::path::PathBuf;

use crate::ExportFormat;

/// Side effects the front end must carry out after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the page and parse its tables; answer with `Msg::TablesFetched`.
    FetchPage { url: String },
    /// Ask the user where to save; answer with `Msg::ExportDestinationChosen`.
    PromptDestination { format: ExportFormat },
    /// Export the current selection to `path`; answer with `Msg::ExportFinished`.
    WriteExport { format: ExportFormat, path: PathBuf },
}
