use crate::domain::AppError;
use crate::domain::collector::{Answer, Question};

/// Port through which the collector asks its questions.
pub trait Prompter {
    /// Ask `question` and return the raw answer.
    fn ask(&mut self, question: &Question) -> Result<Answer, AppError>;

    /// Called when the answer to `question` was refused.
    ///
    /// Returning `Ok` asks the question again; interactive prompters do that,
    /// declarative ones fail the run.
    fn reject(&mut self, question: &Question, reason: &str) -> Result<(), AppError>;
}
