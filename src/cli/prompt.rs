use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

/// Source of user answers for the interactive menus.
///
/// `None` means input is exhausted; menus treat it as a request to leave.
pub trait Prompt {
    fn ask(&mut self, label: &str) -> io::Result<Option<String>>;

    /// Like `ask`, without echoing the answer where the input supports it.
    fn ask_secret(&mut self, label: &str) -> io::Result<Option<String>>;

    /// Wait for acknowledgement before the next screen is drawn.
    fn pause(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Reads answers from stdin.
pub struct TerminalPrompt {
    interactive: bool,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }
}

impl Default for TerminalPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompt for TerminalPrompt {
    fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", label.blue())?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask_secret(&mut self, label: &str) -> io::Result<Option<String>> {
        if !self.interactive {
            return self.ask(label);
        }
        match rpassword::prompt_password(label.blue().to_string()) {
            Ok(secret) => Ok(Some(secret)),
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn pause(&mut self) -> io::Result<()> {
        if self.interactive {
            self.ask("Press Enter to continue...")?;
        }
        Ok(())
    }
}

/// Replays a fixed list of answers and records every label it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Labels asked so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Answers that were never consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        self.asked.push(label.to_string());
        Ok(self.answers.pop_front())
    }

    fn ask_secret(&mut self, label: &str) -> io::Result<Option<String>> {
        self.ask(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_prompt_replays_in_order() {
        let mut prompt = ScriptedPrompt::new(["1", "alice"]);
        assert_eq!(prompt.ask("Choice: ").unwrap().as_deref(), Some("1"));
        assert_eq!(prompt.ask_secret("Name: ").unwrap().as_deref(), Some("alice"));
        assert_eq!(prompt.ask("Choice: ").unwrap(), None);
        assert_eq!(prompt.asked(), ["Choice: ", "Name: ", "Choice: "]);
        assert_eq!(prompt.remaining(), 0);
    }
}
