use std::io::{BufRead, Write};
use std::path::PathBuf;

use engine_logging::engine_warn;

use super::terminal::Terminal;

/// Asks the user where an export should go.
pub trait DestinationPrompt {
    /// `extension` is the hint without the dot. `None` means the user cancelled.
    fn prompt_for_path(&mut self, extension: &str) -> Option<PathBuf>;
}

impl<R: BufRead, W: Write> DestinationPrompt for Terminal<R, W> {
    fn prompt_for_path(&mut self, extension: &str) -> Option<PathBuf> {
        let question = format!("Save as (.{extension} added if no extension, empty line cancels): ");
        match self.ask(&question) {
            Ok(line) => line.and_then(|line| destination_from_input(&line, extension)),
            Err(err) => {
                engine_warn!("destination prompt failed: {}", err);
                None
            }
        }
    }
}

/// Turns the typed path into a destination, adding `extension` when the path has none.
pub fn destination_from_input(line: &str, extension: &str) -> Option<PathBuf> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut path = PathBuf::from(trimmed);
    if path.extension().is_none() {
        path.set_extension(extension);
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn extension_is_added_only_when_missing() {
        assert_eq!(
            destination_from_input("out/report\n", "csv"),
            Some(PathBuf::from("out/report.csv"))
        );
        assert_eq!(
            destination_from_input("tables.data", "xlsx"),
            Some(PathBuf::from("tables.data"))
        );
    }

    #[test]
    fn blank_line_or_eof_cancels() {
        assert_eq!(destination_from_input("  \n", "csv"), None);

        let mut out = Vec::new();
        let chosen = Terminal::new(Cursor::new(""), &mut out).prompt_for_path("xlsx");
        assert_eq!(chosen, None);
        assert!(String::from_utf8(out).unwrap().contains("Save as (.xlsx"));
    }

    #[test]
    fn typed_path_is_read_from_input() {
        let mut out = Vec::new();
        let mut terminal = Terminal::new(Cursor::new("book\nnext\n"), &mut out);
        assert_eq!(terminal.prompt_for_path("xlsx"), Some(PathBuf::from("book.xlsx")));
        assert_eq!(terminal.ask("> ").unwrap(), Some("next\n".to_string()));
    }
}
