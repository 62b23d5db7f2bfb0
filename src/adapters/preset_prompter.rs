//! Declarative answers read from a TOML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::AppError;
use crate::domain::collector::{Answer, Question, QuestionKind};
use crate::ports::Prompter;

/// Answers questions from a table keyed by the stored-configuration names
/// (`kubernetesNamespace`, `appsFolders`, ...). Unanswered questions take
/// their default; a rejected answer fails the run.
#[derive(Debug, Clone, Default)]
pub struct PresetPrompter {
    values: toml::Table,
}

impl PresetPrompter {
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, AppError> {
        let values: toml::Table = toml::from_str(content)?;
        Ok(Self { values })
    }
}

impl Prompter for PresetPrompter {
    fn ask(&mut self, question: &Question) -> Result<Answer, AppError> {
        match self.values.get(question.key) {
            Some(value) => convert(question, value),
            None => {
                debug!(key = question.key, "no preset answer, using the default");
                Ok(question.default_answer())
            }
        }
    }

    fn reject(&mut self, question: &Question, reason: &str) -> Result<(), AppError> {
        Err(AppError::validation(format!("{}: {}", question.key, reason)))
    }
}

fn convert(question: &Question, value: &toml::Value) -> Result<Answer, AppError> {
    use toml::Value;

    match (&question.kind, value) {
        (QuestionKind::Select { .. }, Value::String(choice)) => Ok(Answer::Choice(choice.clone())),
        (QuestionKind::MultiSelect { .. }, Value::String(choice)) => Ok(Answer::Choices(vec![choice.clone()])),
        (QuestionKind::MultiSelect { .. }, Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(|| mismatch(question, "a list of strings", item)))
            .collect::<Result<Vec<_>, _>>()
            .map(Answer::Choices),
        (QuestionKind::Input { .. } | QuestionKind::Password { .. }, Value::String(text)) => {
            Ok(Answer::Text(text.clone()))
        }
        (QuestionKind::Input { .. } | QuestionKind::Password { .. }, Value::Integer(number)) => {
            Ok(Answer::Text(number.to_string()))
        }
        (QuestionKind::Confirm { .. }, Value::Boolean(flag)) => Ok(Answer::Flag(*flag)),
        (kind, other) => Err(mismatch(question, expected(kind), other)),
    }
}

fn expected(kind: &QuestionKind) -> &'static str {
    match kind {
        QuestionKind::Select { .. } | QuestionKind::Input { .. } | QuestionKind::Password { .. } => "a string",
        QuestionKind::MultiSelect { .. } => "a list of strings",
        QuestionKind::Confirm { .. } => "a boolean",
    }
}

fn mismatch(question: &Question, expected: &str, found: &toml::Value) -> AppError {
    AppError::validation(format!("{}: expected {}, found {}", question.key, expected, found.type_str()))
}
