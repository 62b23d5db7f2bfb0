//! Interactive terminal prompts.

use dialoguer::{Confirm, Input, MultiSelect, Password, Select};

use crate::domain::AppError;
use crate::domain::collector::{Answer, Question, QuestionKind};
use crate::ports::Prompter;

/// Asks every question on the terminal; rejected answers are asked again.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn ask(&mut self, question: &Question) -> Result<Answer, AppError> {
        match &question.kind {
            QuestionKind::Select { choices, default } => {
                let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
                let index = Select::new()
                    .with_prompt(&question.message)
                    .items(&labels)
                    .default(*default)
                    .interact()
                    .map_err(prompt_error)?;
                Ok(Answer::Choice(choices[index].value.clone()))
            }
            QuestionKind::MultiSelect { choices, defaults } => {
                let labels: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();
                let picked = MultiSelect::new()
                    .with_prompt(&question.message)
                    .items(&labels)
                    .defaults(defaults)
                    .interact()
                    .map_err(prompt_error)?;
                Ok(Answer::Choices(picked.into_iter().map(|i| choices[i].value.clone()).collect()))
            }
            QuestionKind::Input { default } => {
                let mut input = Input::<String>::new().with_prompt(&question.message).allow_empty(true);
                if let Some(default) = default {
                    input = input.default(default.clone());
                }
                Ok(Answer::Text(input.interact_text().map_err(prompt_error)?))
            }
            QuestionKind::Password { default } => {
                let entered = Password::new()
                    .with_prompt(format!("{} (leave empty to keep the default)", question.message))
                    .allow_empty_password(true)
                    .interact()
                    .map_err(prompt_error)?;
                let password = match (entered.is_empty(), default) {
                    (true, Some(default)) => default.clone(),
                    _ => entered,
                };
                Ok(Answer::Text(password))
            }
            QuestionKind::Confirm { default } => {
                let confirmed = Confirm::new()
                    .with_prompt(&question.message)
                    .default(*default)
                    .interact()
                    .map_err(prompt_error)?;
                Ok(Answer::Flag(confirmed))
            }
        }
    }

    fn reject(&mut self, _question: &Question, reason: &str) -> Result<(), AppError> {
        eprintln!("⚠️  {}", reason);
        Ok(())
    }
}

fn prompt_error(err: dialoguer::Error) -> AppError {
    AppError::Prompt(err.to_string())
}
