//! Line-oriented interactive prompts.
//!
//! `Prompter` wraps any `BufRead`/`Write` pair so the same validated
//! re-prompting loops drive both the real terminal and scripted test
//! sessions. Invalid input never aborts a session: the user is told what
//! was wrong and asked again. A closed input stream is the one hard error.

use super::ui;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Stdout, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

/// A prompter wired to the process's stdin and stdout.
pub fn stdio() -> Prompter<std::io::StdinLock<'static>, Stdout> {
    Prompter::new(std::io::stdin().lock(), std::io::stdout())
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Consumes the prompter, handing back its reader and writer.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Prints a line of narration.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("Failed to write output")?;
        Ok(())
    }

    /// Asks for a number that must be at least `min`.
    pub fn ask_number(&mut self, prompt: &str, min: f64) -> Result<f64> {
        loop {
            let raw = self.ask(prompt)?;
            match raw.parse::<f64>() {
                Ok(value) if value >= min => return Ok(value),
                Ok(_) => self.complain(&format!("The value cannot be less than {min}."))?,
                Err(_) => self.complain("Please enter a valid number (example: 1000.50).")?,
            }
        }
    }

    /// Asks for a whole number of at least one.
    pub fn ask_positive_int(&mut self, prompt: &str) -> Result<u32> {
        loop {
            let raw = self.ask(prompt)?;
            match raw.parse::<u32>() {
                Ok(value) if value >= 1 => return Ok(value),
                Ok(_) => self.complain("Please enter a positive number.")?,
                Err(_) => self.complain("Please enter a whole number (example: 10).")?,
            }
        }
    }

    /// Asks for a non-empty name that `is_taken` does not already claim.
    pub fn ask_unique_name(
        &mut self,
        prompt: &str,
        is_taken: impl Fn(&str) -> bool,
    ) -> Result<String> {
        loop {
            let raw = self.ask(prompt)?;
            if raw.is_empty() {
                self.complain("The name cannot be empty.")?;
            } else if is_taken(&raw) {
                self.complain("That asset is already in the list. Use a unique name.")?;
            } else {
                return Ok(raw);
            }
        }
    }

    /// Asks the user to pick one of the given single-letter choices.
    pub fn ask_choice(&mut self, prompt: &str, choices: &[char]) -> Result<char> {
        loop {
            let raw = self.ask(prompt)?.to_lowercase();
            let mut chars = raw.chars();
            if let (Some(choice), None) = (chars.next(), chars.next())
                && choices.contains(&choice)
            {
                return Ok(choice);
            }
            let listed: Vec<String> = choices.iter().map(|c| format!("'{c}'")).collect();
            self.complain(&format!("Please choose one of {}.", listed.join(", ")))?;
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt} ").context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            bail!("Input closed before the session finished");
        }
        Ok(line.trim().to_string())
    }

    fn complain(&mut self, message: &str) -> Result<()> {
        self.say(&ui::style_text(message, ui::StyleType::Error))
    }
}
