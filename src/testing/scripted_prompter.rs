//! Test double for `Prompter`.

use std::collections::HashMap;

use crate::domain::AppError;
use crate::domain::collector::{Answer, Question};
use crate::ports::Prompter;

/// Answers questions from a script, falling back to each question's default.
///
/// Rejections are fatal, as with any non-interactive prompter.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPrompter {
    answers: HashMap<String, Answer>,
    abort_at: Option<String>,
    asked: Vec<Question>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, key: &str, answer: Answer) -> Self {
        self.answers.insert(key.to_string(), answer);
        self
    }

    /// Simulate the user interrupting the session when `key` is asked.
    pub fn abort_at(mut self, key: &str) -> Self {
        self.abort_at = Some(key.to_string());
        self
    }

    pub fn was_asked(&self, key: &str) -> bool {
        self.asked.iter().any(|question| question.key == key)
    }

    pub fn choices_offered(&self, key: &str) -> Option<Vec<String>> {
        self.asked
            .iter()
            .find(|question| question.key == key)
            .map(|question| question.choices().iter().map(|choice| choice.value.clone()).collect())
    }

    pub fn asked_keys(&self) -> Vec<&'static str> {
        self.asked.iter().map(|question| question.key).collect()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &Question) -> Result<Answer, AppError> {
        self.asked.push(question.clone());
        if self.abort_at.as_deref() == Some(question.key) {
            return Err(AppError::Prompt("interrupted".to_string()));
        }
        Ok(self.answers.get(question.key).cloned().unwrap_or_else(|| question.default_answer()))
    }

    fn reject(&mut self, question: &Question, reason: &str) -> Result<(), AppError> {
        Err(AppError::validation(format!("{}: {}", question.key, reason)))
    }
}
