//! Option resolution with interactive fallback
//!
//! A value supplied on the command line is validated once and a bad value
//! is fatal. A missing value is asked for until it validates or the user
//! types the quit token.

use anyhow::Result;
use colored::Colorize;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Typing this at any prompt abandons the run without changes
pub const QUIT_TOKEN: &str = "q";

/// Outcome of resolving one option
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Value(T),
    Quit,
}

/// Source of interactive answers
pub trait Prompter {
    /// Ask one question; `None` means input is exhausted
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Report a rejected answer before asking again
    fn reject(&mut self, reason: &str) {
        println!("  {}", reason.yellow());
    }
}

/// Reads answers from stdin
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        print!("{prompt} ('{QUIT_TOKEN}' to quit): ");
        io::stdout().flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(input.trim().to_string()))
    }
}

/// Refuses to prompt; used with `--no-input` or when stdin isn't a terminal
pub struct NoInput;

impl Prompter for NoInput {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        anyhow::bail!("Missing value for '{prompt}' and interactive input is disabled")
    }
}

/// Replays canned answers and records every question asked
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
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
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn reject(&mut self, _reason: &str) {}
}

/// Resolve a single option from a supplied value or the prompter
pub fn resolve_option<T>(
    supplied: Option<String>,
    validate: impl Fn(&str) -> Result<T>,
    prompt: &str,
    prompter: &mut dyn Prompter,
) -> Result<Resolution<T>> {
    if let Some(value) = supplied {
        return validate(&value).map(Resolution::Value);
    }

    loop {
        let Some(answer) = prompter.ask(prompt)? else {
            return Ok(Resolution::Quit);
        };
        if answer == QUIT_TOKEN {
            return Ok(Resolution::Quit);
        }
        match validate(&answer) {
            Ok(value) => return Ok(Resolution::Value(value)),
            Err(e) => prompter.reject(&e.to_string()),
        }
    }
}

/// Parse a yes/no answer
pub fn parse_yes_no(input: &str) -> Result<bool> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" => Ok(true),
        "n" | "no" | "false" => Ok(false),
        other => anyhow::bail!("Please answer y or n (got '{}')", other),
    }
}

/// Accept any text, including an empty answer
pub fn any_text(input: &str) -> Result<String> {
    Ok(input.trim().to_string())
}
