//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{DateTime, Duration, Utc};

use crate::app::RegistrationForm;
use crate::config::Config;
use crate::domain::entities::{Choice, ChoiceId, ExternalPost, Question, QuestionId};

/// Create a test question published one hour ago
pub fn test_question(id: i32) -> Question {
    test_question_published(id, Utc::now() - Duration::hours(1))
}

/// Create a test question with a specific publication date
pub fn test_question_published(id: i32, pub_date: DateTime<Utc>) -> Question {
    Question {
        id: QuestionId(id),
        question_text: format!("Question #{}?", id),
        pub_date,
    }
}

/// Create a test choice with a starting tally
pub fn test_choice(id: i32, question_id: i32, votes: i32) -> Choice {
    Choice {
        id: ChoiceId(id),
        question_id: QuestionId(question_id),
        choice_text: format!("Choice #{}", id),
        votes,
    }
}

/// Create a valid registration form for a username
pub fn test_registration(username: &str) -> RegistrationForm {
    RegistrationForm {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password1: "s3cure-passw0rd".to_string(),
        password2: "s3cure-passw0rd".to_string(),
    }
}

/// Create `n` upstream posts with ids 1..=n
pub fn test_posts(n: i64) -> Vec<ExternalPost> {
    (1..=n)
        .map(|id| ExternalPost {
            user_id: (id - 1) / 10 + 1,
            id,
            title: format!("Post {}", id),
            body: format!("Body of post {}", id),
        })
        .collect()
}

/// Create a config for router tests: no database, no rate limiting
pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        feed_url: "http://127.0.0.1:9/posts".to_string(),
        feed_timeout: std::time::Duration::from_secs(1),
        session_ttl: Duration::hours(1),
        port: 0,
        rate_limit_enabled: false,
        secure_cookies: false,
    }
}
