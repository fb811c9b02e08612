use url::Url;

use crate::view_model::{AppViewModel, TableCheckbox, TableView};
use crate::{ExportFormat, TableCollection, TableSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlInputError {
    #[error("Please enter a URL")]
    Blank,
    #[error("Invalid URL: {0}")]
    Invalid(String),
}

/// Trims the input, defaults the scheme to https and checks the result is an http(s) URL.
pub fn normalize_url(raw: &str) -> Result<String, UrlInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(UrlInputError::Blank);
    }
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&candidate).map_err(|err| UrlInputError::Invalid(err.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(UrlInputError::Invalid(format!("unsupported scheme {other}"))),
    }
}

/// Everything the front end shows: URL input, loaded tables and the last notice.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    url_input: String,
    session: Option<TableSession>,
    notice: Option<Notice>,
    fetch_in_flight: bool,
    pending_export: Option<ExportFormat>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&TableSession> {
        self.session.as_ref()
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.fetch_in_flight
    }

    pub fn view(&self) -> AppViewModel {
        let Some(session) = self.session.as_ref() else {
            return AppViewModel {
                url_input: self.url_input.clone(),
                notice: self.notice.clone(),
                fetch_in_flight: self.fetch_in_flight,
                ..AppViewModel::default()
            };
        };

        let checkboxes = (0..session.table_count())
            .map(|index| TableCheckbox {
                index,
                label: format!("Table {}", index + 1),
                checked: session.is_selected(index),
            })
            .collect();

        let current_table = session
            .position()
            .zip(session.current().ok())
            .map(|(index, table)| TableView::from_dataset(index, table));

        AppViewModel {
            url_input: self.url_input.clone(),
            notice: self.notice.clone(),
            fetch_in_flight: self.fetch_in_flight,
            table_count: session.table_count(),
            position: session.position(),
            selected_count: session.selection().selected_count(),
            checkboxes,
            current_table,
            can_go_back: session.can_step_backward(),
            can_go_forward: session.can_step_forward(),
        }
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut TableSession> {
        self.session.as_mut()
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.fetch_in_flight = true;
        self.mark_dirty();
    }

    pub(crate) fn end_fetch(&mut self) {
        self.fetch_in_flight = false;
        self.mark_dirty();
    }

    /// Swaps in a new session; the previous collection, selection and cursor go together.
    pub(crate) fn install_collection(&mut self, collection: TableCollection) {
        match self.session.as_mut() {
            Some(session) => session.install(collection),
            None => self.session = Some(TableSession::new(collection)),
        }
        self.pending_export = None;
        self.mark_dirty();
    }

    pub(crate) fn set_pending_export(&mut self, format: ExportFormat) {
        self.pending_export = Some(format);
    }

    pub(crate) fn take_pending_export(&mut self) -> Option<ExportFormat> {
        self.pending_export.take()
    }
}
