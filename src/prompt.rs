//! User input and interaction handling.
//! Interrupted or dismissed prompts surface as [`Error::Cancelled`].

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input};
use std::io;

/// Validation callback for text answers.
pub type Validator = fn(&str) -> std::result::Result<(), String>;

/// A single text question.
#[derive(Debug, Clone)]
pub struct Question {
    /// Stable identifier of the answer, used by non-interactive prompters
    pub key: &'static str,
    pub message: String,
    /// Shown as the default answer; empty means the answer may be left blank
    pub default: String,
    pub validate: Option<Validator>,
}

impl Question {
    pub fn new(key: &'static str, message: impl Into<String>, default: impl Into<String>) -> Self {
        Self { key, message: message.into(), default: default.into(), validate: None }
    }

    pub fn with_validator(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }
}

/// Trait for asking the user questions.
pub trait Prompter {
    /// Asks for a text answer.
    fn input(&self, question: &Question) -> Result<String>;

    /// Asks a yes/no question.
    fn confirm(&self, message: &str, default: bool) -> Result<bool>;
}

fn prompt_error(err: dialoguer::Error) -> Error {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => Error::Cancelled,
        other => Error::IoError(io::Error::other(other.to_string())),
    }
}

/// Terminal prompter backed by dialoguer.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, question: &Question) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(&question.message);
        if question.default.is_empty() {
            input = input.allow_empty(true);
        } else {
            input = input.default(question.default.clone());
        }
        if let Some(validate) = question.validate {
            input = input.validate_with(move |answer: &String| validate(answer));
        }
        let answer = input.interact_text().map_err(prompt_error)?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact_opt()
            .map_err(prompt_error)?
            .ok_or(Error::Cancelled)
    }
}
