use tablescrape_core::Msg;

pub const HELP_TEXT: &str = "\
Commands:
  fetch <url> | url <url>   fetch the tables of a web page
  next | n                  show the next table
  prev | p                  show the previous table
  toggle [i] | t [i]        select or deselect table i (default: the one shown)
  export | e                export the selected tables
  show | s                  print the current view again
  help | h                  print this list
  quit | q                  leave";

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fetch(String),
    Next,
    Previous,
    /// 1-based table number; `None` means the table under the cursor.
    Toggle(Option<usize>),
    Export,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Type 'help' for the list of commands.")]
    Unknown(String),
    #[error("'{0}' needs a URL")]
    MissingUrl(String),
    #[error("'{0}' is not a table number")]
    BadTableNumber(String),
}

/// Parses a line; blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "fetch" | "url" => {
            if rest.is_empty() {
                return Err(CommandError::MissingUrl(word.to_string()));
            }
            Command::Fetch(rest.to_string())
        }
        "next" | "n" => Command::Next,
        "prev" | "p" => Command::Previous,
        "toggle" | "t" => Command::Toggle(parse_table_number(rest)?),
        "export" | "e" => Command::Export,
        "show" | "s" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

fn parse_table_number(arg: &str) -> Result<Option<usize>, CommandError> {
    if arg.is_empty() {
        return Ok(None);
    }
    match arg.parse::<usize>() {
        Ok(number) if number > 0 => Ok(Some(number)),
        _ => Err(CommandError::BadTableNumber(arg.to_string())),
    }
}

impl Command {
    /// Messages for commands that change state. Show, help and quit are handled by the loop.
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            Command::Fetch(url) => vec![Msg::InputChanged(url), Msg::FetchClicked],
            Command::Next => vec![Msg::NextClicked],
            Command::Previous => vec![Msg::PreviousClicked],
            Command::Toggle(Some(number)) => vec![Msg::ToggleClicked { index: number - 1 }],
            Command::Toggle(None) => vec![Msg::ToggleCurrentClicked],
            Command::Export => vec![Msg::ExportClicked],
            Command::Show | Command::Help | Command::Quit => Vec::new(),
        }
    }
}
