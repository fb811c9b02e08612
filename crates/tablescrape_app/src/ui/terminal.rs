use std::io::{self, BufRead, Write};

/// Line-oriented console: commands and prompts share one input stream.
pub struct Terminal<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Prints `prompt` without a newline and reads one line. `None` at end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line))
    }

    pub fn print(&mut self, text: &str) -> io::Result<()> {
        write!(self.out, "{text}")
    }

    pub fn println(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }
}
