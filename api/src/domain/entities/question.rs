//! Question domain entity
//!
//! A poll prompt published at a point in time. Questions are created
//! out-of-band and are read-only inside this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::choice::Choice;

/// Unique identifier for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub i32);

impl From<i32> for QuestionId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A poll question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub id: QuestionId,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

/// A question together with its choices, ordered by choice id
#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithChoices {
    pub question: Question,
    pub choices: Vec<Choice>,
}

impl QuestionWithChoices {
    /// Build from a question and an unordered set of choices
    pub fn new(question: Question, mut choices: Vec<Choice>) -> Self {
        choices.sort_by_key(|c| c.id);
        Self { question, choices }
    }

    /// Sum of all vote tallies
    pub fn total_votes(&self) -> i64 {
        self.choices.iter().map(|c| i64::from(c.votes)).sum()
    }
}
