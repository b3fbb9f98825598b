//! Interactive capabilities the vault needs from its caller.
//!
//! The vault never reads from a terminal itself.  The CLI passes a
//! terminal-backed `Prompter`; tests pass a `ScriptedPrompter`.

use std::collections::VecDeque;

use zeroize::Zeroizing;

use crate::errors::{Result, VaultError};

/// Ask the human a yes/no question or read a hidden line.
pub trait Prompter {
    /// Ask a yes/no question.  Anything but an explicit "yes" is `false`.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Read a line without echo (passphrases, secret values).
    fn read_secret(&mut self, prompt: &str) -> Result<Zeroizing<String>>;
}

/// One canned answer for a `ScriptedPrompter`.
#[derive(Debug, Clone)]
pub enum Answer {
    Confirm(bool),
    Secret(String),
}

/// A `Prompter` that replays a fixed script of answers.
///
/// Every prompt it is shown is recorded so tests can assert on the
/// exact sequence of questions an operation asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// A prompter holding a single confirmation answer.
    pub fn confirming(answer: bool) -> Self {
        Self::new([Answer::Confirm(answer)])
    }

    /// A prompter that must not be asked anything.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Prompts shown so far, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Number of scripted answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, prompt: &str) -> Result<Answer> {
        self.asked.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            VaultError::CommandFailed(format!("unexpected prompt: {prompt}"))
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        match self.next(prompt)? {
            Answer::Confirm(yes) => Ok(yes),
            Answer::Secret(_) => Err(VaultError::CommandFailed(format!(
                "expected a secret prompt, got confirmation: {prompt}"
            ))),
        }
    }

    fn read_secret(&mut self, prompt: &str) -> Result<Zeroizing<String>> {
        match self.next(prompt)? {
            Answer::Secret(s) => Ok(Zeroizing::new(s)),
            Answer::Confirm(_) => Err(VaultError::CommandFailed(format!(
                "expected a confirmation, got secret prompt: {prompt}"
            ))),
        }
    }
}
