//! Poll service
//!
//! Index listing, question detail, results and the vote transition.

use std::sync::Arc;

use crate::domain::entities::{Choice, ChoiceId, Question, QuestionId, QuestionWithChoices};
use crate::domain::ports::{ChoiceRepository, QuestionRepository};
use crate::error::{AppError, DomainError};

/// Number of questions on the index page
pub const LATEST_QUESTIONS_LIMIT: u64 = 5;

/// Message shown when a vote does not name one of the question's choices
pub const NO_CHOICE_SELECTED: &str = "You didn't select a choice.";

/// Service for reading polls and recording votes
pub struct PollService<QR, CR>
where
    QR: QuestionRepository + ?Sized,
    CR: ChoiceRepository + ?Sized,
{
    questions: Arc<QR>,
    choices: Arc<CR>,
}

impl<QR, CR> PollService<QR, CR>
where
    QR: QuestionRepository + ?Sized,
    CR: ChoiceRepository + ?Sized,
{
    pub fn new(questions: Arc<QR>, choices: Arc<CR>) -> Self {
        Self { questions, choices }
    }

    /// Latest published questions, newest first
    pub async fn latest_questions(&self) -> Result<Vec<Question>, AppError> {
        Ok(self.questions.find_latest(LATEST_QUESTIONS_LIMIT).await?)
    }

    /// A question with its choices
    pub async fn question_detail(
        &self,
        question_id: &QuestionId,
    ) -> Result<QuestionWithChoices, AppError> {
        let question = self.get_question(question_id).await?;
        let choices = self.choices.find_by_question(question_id).await?;
        Ok(QuestionWithChoices::new(question, choices))
    }

    /// A question with its current tallies
    pub async fn results(&self, question_id: &QuestionId) -> Result<QuestionWithChoices, AppError> {
        self.question_detail(question_id).await
    }

    /// Record one vote.
    ///
    /// `submitted` is the raw `choice` form value. A missing, non-numeric or
    /// foreign choice is a validation error and leaves every tally untouched.
    pub async fn vote(
        &self,
        question_id: &QuestionId,
        submitted: Option<&str>,
    ) -> Result<Choice, AppError> {
        self.get_question(question_id).await?;

        let choice_id: ChoiceId = submitted
            .and_then(|raw| raw.parse().ok())
            .ok_or_else(|| DomainError::Validation(NO_CHOICE_SELECTED.to_string()))?;

        let choice = self
            .choices
            .increment_votes(question_id, &choice_id)
            .await?
            .ok_or_else(|| DomainError::Validation(NO_CHOICE_SELECTED.to_string()))?;

        tracing::info!(
            question_id = %question_id,
            choice_id = %choice.id,
            votes = choice.votes,
            "Vote recorded"
        );

        Ok(choice)
    }

    async fn get_question(&self, question_id: &QuestionId) -> Result<Question, AppError> {
        self.questions
            .find_by_id(question_id)
            .await?
            .ok_or_else(|| {
                AppError::Domain(DomainError::NotFound(format!(
                    "No question matches id {}",
                    question_id
                )))
            })
    }
}
