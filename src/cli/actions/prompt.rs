//! Line-oriented terminal I/O for interactive commands. Input is read a line
//! at a time and never logged. On an interactive terminal, secrets are read
//! with echo turned off.

use anyhow::{bail, Context, Result};
use secrecy::SecretString;
use serde::Serialize;
use std::fmt::Display;
use std::io::{BufRead, BufReader, IsTerminal, Stdin, Stdout, Write};

pub struct Prompt<R, W> {
    input: R,
    output: W,
    hide_secrets: bool,
}

impl Prompt<BufReader<Stdin>, Stdout> {
    /// Prompt over the process streams. Secrets go through `rpassword` when
    /// stdin is a terminal; piped input is read as plain lines.
    #[must_use]
    pub fn stdio() -> Self {
        let stdin = std::io::stdin();
        let hide_secrets = stdin.is_terminal();
        Self {
            input: BufReader::new(stdin),
            output: std::io::stdout(),
            hide_secrets,
        }
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_secrets: false,
        }
    }

    /// Shows `label` and returns the next line without its line ending.
    ///
    /// # Errors
    /// Returns an error when input is closed or unreadable.
    pub fn ask(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            bail!("input closed");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Like [`Self::ask`], without echo on a terminal.
    ///
    /// # Errors
    /// Returns an error when input is closed or unreadable.
    pub fn ask_secret(&mut self, label: &str) -> Result<SecretString> {
        if !self.hide_secrets {
            return self.ask(label).map(SecretString::from);
        }

        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        rpassword::read_password()
            .map(SecretString::from)
            .context("failed to read input")
    }

    /// Uses `value` when present, otherwise asks for it.
    ///
    /// # Errors
    /// Returns an error when input is closed or unreadable.
    pub fn value_or_ask(&mut self, value: Option<String>, label: &str) -> Result<String> {
        match value {
            Some(value) => Ok(value),
            None => self.ask(label),
        }
    }

    /// # Errors
    /// Returns an error if output cannot be written.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Prints a record as pretty JSON.
    ///
    /// # Errors
    /// Returns an error if the value cannot be serialized or written.
    pub fn show<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.say(json)
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
