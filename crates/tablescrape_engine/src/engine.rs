use std::sync::Arc;

use engine_logging::engine_info;
use tablescrape_core::TabularDataset;

use crate::fetch::{FetchSettings, Fetcher, ProgressSink, ReqwestFetcher};
use crate::tables::{HtmlTableParser, TableParser};
use crate::{FetchError, FetchProgress, Stage};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{0}")]
    Fetch(#[from] FetchError),
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Fetch, decode and parse pipeline, exposed as one blocking call.
pub struct TableEngine {
    runtime: tokio::runtime::Runtime,
    fetcher: Arc<dyn Fetcher>,
    parser: Box<dyn TableParser>,
}

impl TableEngine {
    pub fn new(settings: FetchSettings) -> Result<Self, LoadError> {
        Self::with_parts(
            Arc::new(ReqwestFetcher::new(settings)),
            Box::new(HtmlTableParser),
        )
    }

    pub fn with_parts(
        fetcher: Arc<dyn Fetcher>,
        parser: Box<dyn TableParser>,
    ) -> Result<Self, LoadError> {
        let runtime = tokio::runtime::Runtime::new()?;
        Ok(Self {
            runtime,
            fetcher,
            parser,
        })
    }

    /// Fetches `url` and returns every table on the page. An empty vector means no tables.
    pub fn load_tables(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<TabularDataset>, LoadError> {
        let (decoded, metadata) = self
            .runtime
            .block_on(self.fetcher.fetch_markup(url, sink))?;

        sink.emit(FetchProgress {
            stage: Stage::Parsing,
            bytes: Some(metadata.byte_len),
            tables: None,
        });
        let tables = self.parser.parse(&decoded.html);
        engine_info!(
            "found {} table(s) on {}",
            tables.len(),
            metadata.final_url
        );

        sink.emit(FetchProgress {
            stage: Stage::Done,
            bytes: Some(metadata.byte_len),
            tables: Some(tables.len()),
        });
        Ok(tables)
    }
}
