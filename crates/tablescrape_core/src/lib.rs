//! Tablescrape core: table session model and the pure front-end state machine.
mod collection;
mod cursor;
mod dataset;
mod effect;
mod error;
mod export;
mod msg;
mod selection;
mod session;
mod state;
mod update;
mod view_model;

pub use collection::TableCollection;
pub use cursor::NavigationCursor;
pub use dataset::{CellValue, DatasetError, TabularDataset};
pub use effect::Effect;
pub use error::SessionError;
pub use export::{
    export, sheet_name, ExportError, ExportFormat, ExportPlan, ExportSummary, SinkError,
    TableSink,
};
pub use msg::Msg;
pub use selection::SelectionState;
pub use session::TableSession;
pub use state::{normalize_url, AppState, Notice, NoticeLevel, UrlInputError};
pub use update::update;
pub use view_model::{AppViewModel, TableCheckbox, TableView};
