//! Tablescrape engine: page fetching, table extraction and export writers.
mod decode;
mod engine;
mod export;
mod fetch;
mod persist;
mod tables;
mod types;

pub use decode::{decode_html, DecodedHtml};
pub use engine::{LoadError, TableEngine};
pub use export::{csv_bytes, workbook_bytes, FileTableSink, WriteError};
pub use fetch::{FetchSettings, Fetcher, LogProgressSink, ProgressSink, ReqwestFetcher};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use tables::{HtmlTableParser, TableParser};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, FetchProgress, Stage};
