//! Interactive console prompts
//!
//! Each prompt repeats until it gets a usable answer. Running out of input is
//! not an error condition to recover from, so it surfaces as
//! [`PromptError::InputExhausted`] for the caller to end the session on.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::graph::Graph;
use crate::io::FormatRegistry;

/// Errors that end an interactive session
#[derive(Error, Debug)]
pub enum PromptError {
    /// End of input reached while waiting for a line
    #[error("end of input reached while waiting for a line")]
    InputExhausted,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type PromptResult<T> = Result<T, PromptError>;

/// Line-oriented prompter over any reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the prompter, returning the output sink
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn welcome(&mut self) -> PromptResult<()> {
        writeln!(self.output, "forcelayout interactive mode")?;
        writeln!(
            self.output,
            "Lays out a graph by letting connected nodes attract and all nodes repel."
        )?;
        writeln!(self.output)?;
        Ok(())
    }

    /// Print a line of output
    pub fn say(&mut self, message: &str) -> PromptResult<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Ask for a graph file until one can be read
    pub fn prompt_for_graph(&mut self, registry: &FormatRegistry) -> PromptResult<(PathBuf, Graph)> {
        loop {
            let line = self.ask("Graph file: ")?;
            let name = line.trim();
            if name.is_empty() {
                continue;
            }

            let path = PathBuf::from(name);
            match registry.read(&path) {
                Ok(graph) => return Ok((path, graph)),
                Err(e) => writeln!(self.output, "Unable to read {name}: {e}. Try again.")?,
            }
        }
    }

    /// Ask for a run duration in seconds
    ///
    /// Accepts exactly one finite real number; anything after it is rejected.
    pub fn prompt_duration(&mut self) -> PromptResult<f64> {
        loop {
            let line = self.ask("Seconds to run: ")?;
            let mut tokens = line.split_whitespace();
            if let (Some(token), None) = (tokens.next(), tokens.next()) {
                if let Ok(seconds) = token.parse::<f64>() {
                    if seconds.is_finite() {
                        return Ok(seconds);
                    }
                }
            }
            writeln!(self.output, "Invalid number. Try again.")?;
        }
    }

    /// Ask a yes/no question; only the first character of the answer counts,
    /// so a leading space is not an answer
    pub fn prompt_yes_no(&mut self, question: &str) -> PromptResult<bool> {
        loop {
            let line = self.ask(question)?;
            match line.chars().next().map(|c| c.to_ascii_lowercase()) {
                Some('y') => return Ok(true),
                Some('n') => return Ok(false),
                _ => writeln!(self.output, "Please answer yes or no.")?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> PromptResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::InputExhausted);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
