use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use crate::decode::{decode_html, DecodedHtml};
use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput, FetchProgress, Stage};

const DEFAULT_USER_AGENT: &str = concat!("tablescrape/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 20 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, progress: FetchProgress);
}

/// Sink that only writes progress to the debug log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, progress: FetchProgress) {
        engine_debug!(
            "progress stage={:?} bytes={:?} tables={:?}",
            progress.stage,
            progress.bytes,
            progress.tables
        );
    }
}

/// Downloads a page. `fetch_markup` adds charset decoding on top of the raw bytes.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, sink: &dyn ProgressSink) -> Result<FetchOutput, FetchError>;

    async fn fetch_markup(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<(DecodedHtml, FetchMetadata), FetchError> {
        let FetchOutput { bytes, metadata } = self.fetch(url, sink).await?;
        sink.emit(FetchProgress {
            stage: Stage::Decoding,
            bytes: Some(metadata.byte_len),
            tables: None,
        });
        let decoded = decode_html(&bytes, metadata.content_type.as_deref());
        if decoded.had_replacements {
            engine_warn!(
                "page {} contained bytes invalid for {}",
                metadata.final_url,
                decoded.encoding_label
            );
        }
        Ok((decoded, metadata))
    }
}

/// HTTP(S) fetcher with a redirect budget, a body size cap and a content-type allow-list.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn client(&self, redirects: Arc<AtomicUsize>) -> Result<reqwest::Client, FetchError> {
        let limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let hops = attempt.previous().len();
            redirects.store(hops, Ordering::Relaxed);
            if hops >= limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .user_agent(self.settings.user_agent.as_str())
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    /// Rejects a response by status, declared length or content type before any body is read.
    fn accept(&self, response: &reqwest::Response) -> Result<Option<String>, FetchError> {
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        if let Some(declared) = response.content_length() {
            self.check_size(declared)?;
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        match content_type.as_deref() {
            Some(ct) if !self.is_markup(ct) => Err(FetchError::new(
                FailureKind::UnsupportedContentType {
                    content_type: ct.to_string(),
                },
                "unsupported content type",
            )),
            _ => Ok(content_type),
        }
    }

    fn is_markup(&self, content_type: &str) -> bool {
        let essence = content_type.split(';').next().unwrap_or_default().trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(essence))
    }

    fn check_size(&self, len: u64) -> Result<(), FetchError> {
        if len <= self.settings.max_bytes {
            return Ok(());
        }
        Err(FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(len),
            },
            "response too large",
        ))
    }

    /// Streams the body, stopping as soon as it would pass `max_bytes`.
    async fn read_body(
        &self,
        response: reqwest::Response,
        sink: &dyn ProgressSink,
    ) -> Result<Vec<u8>, FetchError> {
        sink.emit(FetchProgress {
            stage: Stage::Downloading,
            bytes: Some(0),
            tables: None,
        });

        let mut body = Vec::new();
        let mut chunks = response.bytes_stream();
        while let Some(chunk) = chunks.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            self.check_size((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
            sink.emit(FetchProgress {
                stage: Stage::Downloading,
                bytes: Some(body.len() as u64),
                tables: None,
            });
        }
        Ok(body)
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str, sink: &dyn ProgressSink) -> Result<FetchOutput, FetchError> {
        let target = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let redirects = Arc::new(AtomicUsize::new(0));
        let client = self.client(Arc::clone(&redirects))?;

        engine_info!("GET {}", target);
        let response = client.get(target).send().await.map_err(map_reqwest_error)?;
        let content_type = self.accept(&response)?;
        let final_url = response.url().to_string();
        let bytes = self.read_body(response, sink).await?;

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url,
            redirect_count: redirects.load(Ordering::Relaxed),
            content_type,
            byte_len: bytes.len() as u64,
        };
        engine_info!(
            "fetched {} bytes from {} after {} redirect(s)",
            metadata.byte_len,
            metadata.final_url,
            metadata.redirect_count
        );
        Ok(FetchOutput { bytes, metadata })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_redirect() {
        FailureKind::RedirectLimitExceeded
    } else {
        FailureKind::Network
    };
    FetchError::new(kind, err.to_string())
}
