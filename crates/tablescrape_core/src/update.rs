use crate::{
    normalize_url, AppState, Effect, ExportError, Msg, Notice, SessionError, TableCollection,
};

const NO_TABLES_FOUND: &str = "No tables were found on the provided webpage.";
const NOTHING_SELECTED: &str = "Please select at least one table to export";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::FetchClicked => {
            if state.is_fetching() {
                return (state, Vec::new());
            }
            match normalize_url(state.url_input()) {
                Ok(url) => {
                    state.begin_fetch();
                    state.set_notice(Notice::info(format!("Fetching {url}")));
                    vec![Effect::FetchPage { url }]
                }
                Err(err) => {
                    state.set_notice(Notice::warning(err.to_string()));
                    Vec::new()
                }
            }
        }
        Msg::TablesFetched(result) => {
            state.end_fetch();
            match result.map(TableCollection::build) {
                Ok(Ok(collection)) => {
                    let count = collection.len();
                    state.install_collection(collection);
                    state.set_notice(Notice::info(format!("Found {count} table(s)")));
                }
                // The previous session stays in place: an empty page is not a new session.
                Ok(Err(_)) => state.set_notice(Notice::warning(NO_TABLES_FOUND)),
                Err(message) => state.set_notice(Notice::error(format!(
                    "Failed to access the webpage. Error: {message}"
                ))),
            }
            Vec::new()
        }
        Msg::NextClicked => {
            step(&mut state, |session| session.step_forward());
            Vec::new()
        }
        Msg::PreviousClicked => {
            step(&mut state, |session| session.step_backward());
            Vec::new()
        }
        Msg::ToggleClicked { index } => {
            let result = state
                .session_mut()
                .ok_or(SessionError::EmptyCollection)
                .and_then(|session| session.toggle(index));
            apply_toggle(&mut state, result);
            Vec::new()
        }
        Msg::ToggleCurrentClicked => {
            let result = state
                .session_mut()
                .ok_or(SessionError::EmptyCollection)
                .and_then(|session| session.toggle_current());
            apply_toggle(&mut state, result);
            Vec::new()
        }
        Msg::ExportClicked => {
            let format = state
                .session()
                .map_or(Err(ExportError::NoSelection), |session| session.export_format());
            match format {
                Ok(format) => {
                    state.set_pending_export(format);
                    vec![Effect::PromptDestination { format }]
                }
                Err(ExportError::NoSelection) => {
                    state.set_notice(Notice::warning(NOTHING_SELECTED));
                    Vec::new()
                }
                Err(err) => {
                    state.set_notice(Notice::error(err.to_string()));
                    Vec::new()
                }
            }
        }
        Msg::ExportDestinationChosen(choice) => match (state.take_pending_export(), choice) {
            (Some(format), Some(path)) => vec![Effect::WriteExport { format, path }],
            (Some(_), None) => {
                state.set_notice(Notice::info("Export cancelled"));
                Vec::new()
            }
            (None, _) => Vec::new(),
        },
        Msg::ExportFinished(result) => {
            let notice = match result {
                Ok(summary) => Notice::info(format!(
                    "Data exported successfully as {} to {}",
                    summary.format.label(),
                    summary.destination
                )),
                Err(message) => Notice::error(format!("Export failed: {message}")),
            };
            state.set_notice(notice);
            Vec::new()
        }
    };

    (state, effects)
}

fn step(state: &mut AppState, apply: impl FnOnce(&mut crate::TableSession)) {
    let Some(session) = state.session_mut() else {
        return;
    };
    let before = session.position();
    apply(session);
    if session.position() != before {
        state.mark_dirty();
    }
}

fn apply_toggle(state: &mut AppState, result: Result<bool, SessionError>) {
    match result {
        Ok(_) => state.mark_dirty(),
        Err(err) => state.set_notice(Notice::error(format!("Cannot toggle table: {err}"))),
    }
}
