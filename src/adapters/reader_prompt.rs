use std::io::{BufRead, Write};

use crate::domain::AppError;
use crate::ports::LinePrompt;

/// Line prompt over plain reader/writer pairs, used when stdin is not a terminal.
#[derive(Debug)]
pub struct ReaderPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ReaderPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> LinePrompt for ReaderPrompt<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_lines_until_eof() {
        let mut prompt = ReaderPrompt::new(Cursor::new("tool\r\n\nlast"), Vec::new());

        assert_eq!(prompt.read_line("Choice").unwrap().as_deref(), Some("tool"));
        assert_eq!(prompt.read_line("Choice").unwrap().as_deref(), Some(""));
        assert_eq!(prompt.read_line("Choice").unwrap().as_deref(), Some("last"));
        assert_eq!(prompt.read_line("Choice").unwrap(), None);

        let shown = String::from_utf8(prompt.into_output()).unwrap();
        assert_eq!(shown.matches("Choice: ").count(), 4);
    }
}
