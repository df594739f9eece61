//! Line-based prompts for `--interactive`.

use std::io::{self, BufRead, Write};

pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `label (Default = default): ` and reads one line. An empty
    /// answer (or end of input) yields `None`.
    pub fn ask(&mut self, label: &str, default: &str) -> io::Result<Option<String>> {
        write!(self.output, "{} (Default = {}): ", label, default)?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let answer = line.trim();
        Ok(if answer.is_empty() {
            None
        } else {
            Some(answer.to_string())
        })
    }
}
