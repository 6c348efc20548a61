//! Console event sink and confirmation prompts
//!
//! Prints pipeline events to stdout, coloured by level, and blocks on stdin
//! for a y/n answer when an event asks for confirmation.

use crate::app::services::pipeline::{Decision, EventLevel, EventSink, PipelineEvent};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Event sink for interactive terminal use
pub struct ConsoleSink<R, W> {
    input: R,
    output: W,
    assume_yes: bool,
}

impl ConsoleSink<io::StdinLock<'static>, io::Stdout> {
    /// Sink reading answers from stdin and printing to stdout
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), assume_yes)
    }
}

impl<R: BufRead, W: Write> ConsoleSink<R, W> {
    pub fn new(input: R, output: W, assume_yes: bool) -> Self {
        Self {
            input,
            output,
            assume_yes,
        }
    }

    fn print_event(&mut self, event: &PipelineEvent) -> io::Result<()> {
        let line = event.to_string();
        let line = match event.level {
            EventLevel::Info => line.normal(),
            EventLevel::Warning => line.yellow(),
            EventLevel::Error => line.red().bold(),
        };
        writeln!(self.output, "{}", line)
    }

    /// Ask until the answer is yes or no; end of input counts as no
    fn prompt_confirmation(&mut self) -> io::Result<bool> {
        loop {
            write!(self.output, "Continue? y/n: ")?;
            self.output.flush()?;

            let mut answer = String::new();
            if self.input.read_line(&mut answer)? == 0 {
                writeln!(self.output)?;
                return Ok(false);
            }

            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please enter 'y' for yes or 'n' for no.")?,
            }
        }
    }

    fn answer(&mut self, event: &PipelineEvent) -> io::Result<Decision> {
        self.print_event(event)?;

        if !event.requires_confirmation || self.assume_yes {
            return Ok(Decision::Continue);
        }

        if self.prompt_confirmation()? {
            Ok(Decision::Continue)
        } else {
            Ok(Decision::Abort)
        }
    }
}

impl<R: BufRead, W: Write> EventSink for ConsoleSink<R, W> {
    /// A console that cannot be read or written stops the run at the next prompt
    fn emit(&mut self, event: &PipelineEvent) -> Decision {
        self.answer(event).unwrap_or_else(|e| {
            tracing::error!("Console interaction failed: {}", e);
            Decision::Abort
        })
    }
}
