mod common;

use std::path::PathBuf;

use common::{init_logging, tables};
use pretty_assertions::assert_eq;
use tablescrape_core::{
    update, AppState, Effect, ExportFormat, ExportSummary, Msg, Notice, NoticeLevel,
};

fn fetch(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::InputChanged(input.to_string()));
    update(state, Msg::FetchClicked)
}

fn loaded(count: usize) -> AppState {
    let (state, _) = fetch(AppState::new(), "https://example.com/stats");
    let (state, _) = update(state, Msg::TablesFetched(Ok(tables(count))));
    state
}

fn notice_level(state: &AppState) -> Option<NoticeLevel> {
    state.notice().map(|notice| notice.level)
}

#[test]
fn fetch_with_blank_input_warns_and_emits_nothing() {
    init_logging();
    let (state, effects) = fetch(AppState::new(), "   ");

    assert!(effects.is_empty());
    assert_eq!(state.notice(), Some(&Notice::warning("Please enter a URL")));
    assert!(!state.is_fetching());
}

#[test]
fn fetch_normalizes_url_and_emits_effect() {
    init_logging();
    let (mut state, effects) = fetch(AppState::new(), " example.com/page ");

    assert_eq!(
        effects,
        vec![Effect::FetchPage {
            url: "https://example.com/page".to_string()
        }]
    );
    assert!(state.is_fetching());
    assert!(state.consume_dirty());

    // A second click while the first fetch is outstanding is ignored.
    let (_state, effects) = update(state, Msg::FetchClicked);
    assert!(effects.is_empty());
}

#[test]
fn fetched_tables_install_a_fresh_session() {
    init_logging();
    let state = loaded(3);
    let view = state.view();

    assert!(!view.fetch_in_flight);
    assert_eq!(view.table_count, 3);
    assert_eq!(view.position, Some(0));
    assert_eq!(view.selected_count, 0);
    assert_eq!(
        view.checkboxes
            .iter()
            .map(|c| (c.label.as_str(), c.checked))
            .collect::<Vec<_>>(),
        vec![("Table 1", false), ("Table 2", false), ("Table 3", false)]
    );
    let current = view.current_table.unwrap();
    assert_eq!(current.title, "Table 1");
    assert_eq!(current.columns, vec!["Name", "Value"]);
    assert_eq!(current.rows, vec![vec!["t0-0".to_string(), "0".to_string()]]);
    assert_eq!(state.notice(), Some(&Notice::info("Found 3 table(s)")));
}

#[test]
fn no_tables_found_keeps_previous_session() {
    init_logging();
    let (state, _) = update(loaded(2), Msg::ToggleClicked { index: 1 });
    let before = state.session().cloned();

    let (state, _) = fetch(state, "https://example.com/empty");
    let (state, effects) = update(state, Msg::TablesFetched(Ok(Vec::new())));

    assert!(effects.is_empty());
    assert_eq!(state.session().cloned(), before);
    assert_eq!(
        state.notice(),
        Some(&Notice::warning("No tables were found on the provided webpage."))
    );
    assert!(!state.is_fetching());
}

#[test]
fn fetch_failure_is_reported_and_session_survives() {
    init_logging();
    let state = loaded(2);
    let before = state.session().cloned();

    let (state, _) = fetch(state, "https://example.com/down");
    let (state, _) = update(state, Msg::TablesFetched(Err("network error".to_string())));

    assert_eq!(state.session().cloned(), before);
    assert_eq!(notice_level(&state), Some(NoticeLevel::Error));
    assert!(state.notice().unwrap().text.contains("network error"));
}

#[test]
fn new_fetch_resets_selection_and_cursor() {
    init_logging();
    let (state, _) = update(loaded(3), Msg::NextClicked);
    let (state, _) = update(state, Msg::ToggleCurrentClicked);
    assert_eq!(state.view().selected_count, 1);

    let (state, _) = fetch(state, "https://example.com/other");
    let (state, _) = update(state, Msg::TablesFetched(Ok(tables(2))));

    let view = state.view();
    assert_eq!(view.table_count, 2);
    assert_eq!(view.position, Some(0));
    assert_eq!(view.selected_count, 0);
}

#[test]
fn navigation_is_clamped_and_only_dirties_on_movement() {
    init_logging();
    let mut state = loaded(2);
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::PreviousClicked);
    assert!(!state.consume_dirty());

    let (mut state, _) = update(state, Msg::NextClicked);
    assert!(state.consume_dirty());
    assert!(!state.view().can_go_forward);

    let (mut state, _) = update(state, Msg::NextClicked);
    assert!(!state.consume_dirty());
    assert_eq!(state.view().position, Some(1));
}

#[test]
fn toggle_out_of_range_reports_error() {
    init_logging();
    let (state, effects) = update(loaded(2), Msg::ToggleClicked { index: 9 });

    assert!(effects.is_empty());
    assert_eq!(notice_level(&state), Some(NoticeLevel::Error));
    assert_eq!(state.view().selected_count, 0);
}

#[test]
fn export_without_selection_warns() {
    init_logging();
    let (state, effects) = update(loaded(2), Msg::ExportClicked);

    assert!(effects.is_empty());
    assert_eq!(
        state.notice(),
        Some(&Notice::warning("Please select at least one table to export"))
    );

    let (state, effects) = update(AppState::new(), Msg::ExportClicked);
    assert!(effects.is_empty());
    assert_eq!(notice_level(&state), Some(NoticeLevel::Warning));
}

#[test]
fn export_prompts_with_policy_format_then_writes() {
    init_logging();
    let (state, _) = update(loaded(3), Msg::ToggleClicked { index: 0 });
    let (state, effects) = update(state, Msg::ExportClicked);
    assert_eq!(
        effects,
        vec![Effect::PromptDestination {
            format: ExportFormat::Csv
        }]
    );

    let path = PathBuf::from("/tmp/out.csv");
    let (state, effects) = update(state, Msg::ExportDestinationChosen(Some(path.clone())));
    assert_eq!(
        effects,
        vec![Effect::WriteExport {
            format: ExportFormat::Csv,
            path
        }]
    );

    let summary = ExportSummary {
        format: ExportFormat::Csv,
        tables_written: 1,
        sheet_names: Vec::new(),
        destination: "/tmp/out.csv".to_string(),
    };
    let (state, _) = update(state, Msg::ExportFinished(Ok(summary)));
    assert_eq!(
        state.notice(),
        Some(&Notice::info(
            "Data exported successfully as CSV to /tmp/out.csv"
        ))
    );
}

#[test]
fn multi_selection_prompts_for_workbook() {
    init_logging();
    let (state, _) = update(loaded(3), Msg::ToggleClicked { index: 0 });
    let (state, _) = update(state, Msg::ToggleClicked { index: 2 });
    let (_state, effects) = update(state, Msg::ExportClicked);

    assert_eq!(
        effects,
        vec![Effect::PromptDestination {
            format: ExportFormat::Xlsx
        }]
    );
}

#[test]
fn cancelled_destination_is_not_an_error() {
    init_logging();
    let (state, _) = update(loaded(2), Msg::ToggleClicked { index: 1 });
    let (state, _) = update(state, Msg::ExportClicked);
    let (state, effects) = update(state, Msg::ExportDestinationChosen(None));

    assert!(effects.is_empty());
    assert_eq!(state.notice(), Some(&Notice::info("Export cancelled")));

    // A stray destination without a pending export does nothing.
    let (_state, effects) =
        update(state, Msg::ExportDestinationChosen(Some(PathBuf::from("x.csv"))));
    assert!(effects.is_empty());
}

#[test]
fn failed_write_is_reported_and_selection_kept() {
    init_logging();
    let (state, _) = update(loaded(2), Msg::ToggleClicked { index: 1 });
    let (state, _) = update(state, Msg::ExportFinished(Err("permission denied".to_string())));

    assert_eq!(notice_level(&state), Some(NoticeLevel::Error));
    assert_eq!(state.session().unwrap().selected_indices(), vec![1]);
}

#[test]
fn toggling_without_tables_reports_an_error() {
    init_logging();
    for msg in [Msg::ToggleCurrentClicked, Msg::ToggleClicked { index: 0 }] {
        let (state, effects) = update(AppState::new(), msg);

        assert!(effects.is_empty());
        assert!(state.session().is_none());
        assert_eq!(
            state.notice(),
            Some(&Notice::error("Cannot toggle table: no tables are loaded"))
        );
    }
}
