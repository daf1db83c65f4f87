//! Choice domain entity
//!
//! One selectable option under a question. The vote tally is the only
//! mutable field and only ever grows.

use serde::{Deserialize, Serialize};

use super::question::QuestionId;

/// Unique identifier for a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChoiceId(pub i32);

impl From<i32> for ChoiceId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ChoiceId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(ChoiceId)
    }
}

/// A choice with its current vote tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub question_id: QuestionId,
    pub choice_text: String,
    pub votes: i32,
}

impl Choice {
    /// Share of `total` votes, as a percentage rounded to one decimal
    pub fn percentage_of(&self, total: i64) -> f64 {
        if total <= 0 {
            return 0.0;
        }
        let pct = f64::from(self.votes) * 100.0 / total as f64;
        (pct * 10.0).round() / 10.0
    }
}
