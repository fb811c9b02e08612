use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use tablescrape_core::{update, AppState, Effect, Msg, Notice, NoticeLevel};

use crate::commands::{parse_command, Command, HELP_TEXT};
use crate::effects::{write_export, TableSource};
use crate::ui::prompt::DestinationPrompt;
use crate::ui::render;
use crate::ui::terminal::Terminal;

/// Terminal front end: reads commands, feeds them through `update` and runs the effects.
pub struct App<R, W> {
    state: AppState,
    source: Box<dyn TableSource>,
    terminal: Terminal<R, W>,
    preview_rows: usize,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(source: Box<dyn TableSource>, input: R, out: W, preview_rows: usize) -> Self {
        Self {
            state: AppState::new(),
            source,
            terminal: Terminal::new(input, out),
            preview_rows,
        }
    }

    /// Runs until `quit` or end of input. `initial_url` is fetched before the first prompt.
    pub fn run(&mut self, initial_url: Option<String>) -> io::Result<()> {
        self.terminal.println("tablescrape: type 'help' for commands.")?;
        if let Some(url) = initial_url {
            self.dispatch_command(Command::Fetch(url))?;
        }

        while let Some(line) = self.terminal.ask("> ")? {
            match parse_command(&line) {
                Ok(None) => {}
                Ok(Some(Command::Quit)) => break,
                Ok(Some(Command::Help)) => self.terminal.println(HELP_TEXT)?,
                Ok(Some(Command::Show)) => self.render()?,
                Ok(Some(command)) => self.dispatch_command(command)?,
                Err(err) => self.terminal.println(&err.to_string())?,
            }
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    fn dispatch_command(&mut self, command: Command) -> io::Result<()> {
        engine_debug!("command {:?}", command);
        for msg in command.into_msgs() {
            self.dispatch_msg(msg)?;
        }
        Ok(())
    }

    /// Applies `msg` and every message produced by its effects, rendering whenever the view
    /// changed before blocking on an effect or once the chain settles.
    fn dispatch_msg(&mut self, msg: Msg) -> io::Result<()> {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let previous_notice = self.state.notice().cloned();
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            if let Some(notice) = self.state.notice() {
                if previous_notice.as_ref() != Some(notice) {
                    log_notice(notice);
                }
            }
            if (!effects.is_empty() || inbox.is_empty()) && self.state.consume_dirty() {
                self.render()?;
            }
            for effect in effects {
                inbox.push_back(self.run_effect(effect));
            }
        }
        Ok(())
    }

    fn run_effect(&mut self, effect: Effect) -> Msg {
        match effect {
            Effect::FetchPage { url } => {
                engine_info!("fetching tables from {}", url);
                Msg::TablesFetched(self.source.fetch_tables(&url))
            }
            Effect::PromptDestination { format } => {
                Msg::ExportDestinationChosen(self.terminal.prompt_for_path(format.extension()))
            }
            Effect::WriteExport { format, path } => {
                Msg::ExportFinished(write_export(&self.state, format, &path))
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        self.terminal.print(&render::render(&view, self.preview_rows))
    }
}

fn log_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Info => engine_info!("notice: {}", notice.text),
        NoticeLevel::Warning => engine_warn!("notice: {}", notice.text),
        NoticeLevel::Error => engine_error!("notice: {}", notice.text),
    }
}
