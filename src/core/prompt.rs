//! Interactive input, behind a trait so workflows can be driven without a terminal.

use crate::core::error::LearnsyncError;
use dialoguer::{Confirm, Input, Password};

pub trait Prompter {
    /// Ask for a line of text, optionally pre-filled with `default`.
    fn input(&self, label: &str, default: Option<&str>) -> Result<String, LearnsyncError>;
    /// Ask for a secret without echoing it.
    fn secret(&self, label: &str) -> Result<String, LearnsyncError>;
    fn confirm(&self, label: &str, default: bool) -> Result<bool, LearnsyncError>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, label: &str, default: Option<&str>) -> Result<String, LearnsyncError> {
        let mut input = Input::<String>::new().with_prompt(label);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        input
            .interact_text()
            .map(|value| value.trim().to_string())
            .map_err(|e| LearnsyncError::PromptFailed(format!("{}: {}", label, e)))
    }

    fn secret(&self, label: &str) -> Result<String, LearnsyncError> {
        Password::new()
            .with_prompt(label)
            .interact()
            .map_err(|e| LearnsyncError::PromptFailed(format!("{}: {}", label, e)))
    }

    fn confirm(&self, label: &str, default: bool) -> Result<bool, LearnsyncError> {
        Confirm::new()
            .with_prompt(label)
            .default(default)
            .interact()
            .map_err(|e| LearnsyncError::PromptFailed(format!("{}: {}", label, e)))
    }
}
