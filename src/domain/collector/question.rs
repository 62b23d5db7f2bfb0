use crate::domain::AppError;

/// One selectable option of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into() }
    }

    /// A choice whose label is its value.
    pub fn plain(value: impl Into<String>) -> Self {
        let value = value.into();
        Self { label: value.clone(), value }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Select { choices: Vec<Choice>, default: usize },
    MultiSelect { choices: Vec<Choice>, defaults: Vec<bool> },
    Input { default: Option<String> },
    Password { default: Option<String> },
    Confirm { default: bool },
}

/// A question the collector puts to the user, identified by the field it answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub key: &'static str,
    pub message: String,
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Choice(String),
    Choices(Vec<String>),
    Text(String),
    Flag(bool),
}

impl Question {
    /// Single choice; `default` picks the choice with that value, falling back to the first.
    pub fn select(key: &'static str, message: impl Into<String>, choices: Vec<Choice>, default: &str) -> Self {
        let default = choices.iter().position(|choice| choice.value == default).unwrap_or(0);
        Self { key, message: message.into(), kind: QuestionKind::Select { choices, default } }
    }

    pub fn multi_select(
        key: &'static str,
        message: impl Into<String>,
        choices: Vec<Choice>,
        selected: &[String],
    ) -> Self {
        let defaults = choices.iter().map(|choice| selected.contains(&choice.value)).collect();
        Self { key, message: message.into(), kind: QuestionKind::MultiSelect { choices, defaults } }
    }

    pub fn input(key: &'static str, message: impl Into<String>, default: Option<String>) -> Self {
        Self { key, message: message.into(), kind: QuestionKind::Input { default } }
    }

    pub fn password(key: &'static str, message: impl Into<String>, default: Option<String>) -> Self {
        Self { key, message: message.into(), kind: QuestionKind::Password { default } }
    }

    pub fn confirm(key: &'static str, message: impl Into<String>, default: bool) -> Self {
        Self { key, message: message.into(), kind: QuestionKind::Confirm { default } }
    }

    /// The answer given when the user accepts every default.
    pub fn default_answer(&self) -> Answer {
        match &self.kind {
            QuestionKind::Select { choices, default } => {
                Answer::Choice(choices.get(*default).map(|c| c.value.clone()).unwrap_or_default())
            }
            QuestionKind::MultiSelect { choices, defaults } => Answer::Choices(
                choices
                    .iter()
                    .zip(defaults)
                    .filter(|(_, selected)| **selected)
                    .map(|(choice, _)| choice.value.clone())
                    .collect(),
            ),
            QuestionKind::Input { default } | QuestionKind::Password { default } => {
                Answer::Text(default.clone().unwrap_or_default())
            }
            QuestionKind::Confirm { default } => Answer::Flag(*default),
        }
    }

    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            QuestionKind::Select { choices, .. } | QuestionKind::MultiSelect { choices, .. } => choices,
            _ => &[],
        }
    }

    fn mismatch(&self, answer: &Answer) -> AppError {
        AppError::validation(format!("unexpected answer {:?} for '{}'", answer, self.key))
    }

    /// Extract a single choice, checking it is one of the offered values.
    pub fn expect_choice(&self, answer: Answer) -> Result<String, AppError> {
        match answer {
            Answer::Choice(value) if self.choices().iter().any(|c| c.value == value) => Ok(value),
            Answer::Choice(value) => Err(AppError::validation(format!(
                "'{}' is not a valid answer for '{}' (expected one of: {})",
                value,
                self.key,
                self.choices().iter().map(|c| c.value.as_str()).collect::<Vec<_>>().join(", ")
            ))),
            other => Err(self.mismatch(&other)),
        }
    }

    /// Extract a set of choices, returned in the order the choices were offered.
    pub fn expect_choices(&self, answer: Answer) -> Result<Vec<String>, AppError> {
        match answer {
            Answer::Choices(values) => {
                if let Some(unknown) =
                    values.iter().find(|value| !self.choices().iter().any(|c| &c.value == *value))
                {
                    return Err(AppError::validation(format!(
                        "'{}' is not a valid answer for '{}'",
                        unknown, self.key
                    )));
                }
                Ok(self
                    .choices()
                    .iter()
                    .filter(|choice| values.contains(&choice.value))
                    .map(|choice| choice.value.clone())
                    .collect())
            }
            other => Err(self.mismatch(&other)),
        }
    }

    pub fn expect_text(&self, answer: Answer) -> Result<String, AppError> {
        match answer {
            Answer::Text(text) => Ok(text.trim().to_string()),
            other => Err(self.mismatch(&other)),
        }
    }

    pub fn expect_flag(&self, answer: Answer) -> Result<bool, AppError> {
        match answer {
            Answer::Flag(flag) => Ok(flag),
            other => Err(self.mismatch(&other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn services() -> Question {
        Question::multi_select(
            "appsFolders",
            "Which applications?",
            vec![Choice::plain("gateway"), Choice::plain("invoice"), Choice::plain("store")],
            &["store".to_string(), "gateway".to_string()],
        )
    }

    #[test]
    fn multi_select_defaults_follow_offer_order() {
        assert_eq!(
            services().default_answer(),
            Answer::Choices(vec!["gateway".to_string(), "store".to_string()])
        );
    }

    #[test]
    fn choices_are_normalized_to_offer_order() {
        let answer = Answer::Choices(vec!["store".into(), "invoice".into(), "store".into()]);
        assert_eq!(services().expect_choices(answer).unwrap(), ["invoice", "store"]);
    }

    #[test]
    fn unknown_choices_are_rejected() {
        let question = services();
        assert!(question.expect_choices(Answer::Choices(vec!["billing".into()])).is_err());
        assert!(question.expect_text(Answer::Flag(true)).is_err());

        let select = Question::select("monitoring", "Monitor?", vec![Choice::plain("no")], "no");
        assert!(select.expect_choice(Answer::Choice("grafana".into())).is_err());
    }

    #[test]
    fn select_default_falls_back_to_first_choice() {
        let question =
            Question::select("k", "m", vec![Choice::plain("a"), Choice::plain("b")], "missing");
        assert_eq!(question.default_answer(), Answer::Choice("a".to_string()));
    }
}
