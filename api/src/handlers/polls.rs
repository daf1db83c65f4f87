//! Poll handlers
//!
//! Index, detail, results and voting.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Extension, Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::domain::entities::{Question, QuestionId, QuestionWithChoices};
use crate::error::{AppError, DomainError};
use crate::handlers::{see_other, wants_json};
use crate::pages::{render_detail, render_index, render_results};
use crate::AppState;

/// Submitted vote form
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}

/// Question summary for the index listing
#[derive(Serialize)]
pub struct QuestionCard {
    pub id: i32,
    pub question_text: String,
    pub pub_date: String,
    pub url: String,
}

impl From<&Question> for QuestionCard {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id.0,
            question_text: q.question_text.clone(),
            pub_date: q.pub_date.to_rfc3339(),
            url: format!("/{}/", q.id),
        }
    }
}

#[derive(Serialize)]
pub struct IndexResponse {
    pub latest_question_list: Vec<QuestionCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[derive(Serialize)]
pub struct ChoiceCard {
    pub id: i32,
    pub choice_text: String,
    pub votes: i32,
    pub percentage: f64,
}

#[derive(Serialize)]
pub struct DetailResponse {
    pub question: QuestionCard,
    pub choices: Vec<ChoiceCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Serialize)]
pub struct ResultsResponse {
    pub question: QuestionCard,
    pub choices: Vec<ChoiceCard>,
    pub total_votes: i64,
}

fn choice_cards(detail: &QuestionWithChoices) -> Vec<ChoiceCard> {
    let total = detail.total_votes();
    detail
        .choices
        .iter()
        .map(|c| ChoiceCard {
            id: c.id.0,
            choice_text: c.choice_text.clone(),
            votes: c.votes,
            percentage: c.percentage_of(total),
        })
        .collect()
}

/// Parse a question id path segment; anything non-numeric is a 404
fn parse_question_id(raw: &str) -> Result<QuestionId, AppError> {
    raw.parse::<i32>()
        .map(QuestionId)
        .map_err(|_| AppError::NotFound(format!("No question matches id {}", raw)))
}

fn detail_response(
    detail: &QuestionWithChoices,
    error_message: Option<&str>,
    headers: &HeaderMap,
) -> Response {
    if wants_json(headers) {
        Json(DetailResponse {
            question: QuestionCard::from(&detail.question),
            choices: choice_cards(detail),
            error_message: error_message.map(str::to_string),
        })
        .into_response()
    } else {
        render_detail(detail, error_message).into_response()
    }
}

/// GET /
///
/// The five most recently published questions.
pub async fn index(
    State(state): State<AppState>,
    current: Option<Extension<CurrentUser>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let questions = state.poll_service.latest_questions().await?;
    let username = current.as_ref().map(|Extension(c)| c.user.username.as_str());

    if wants_json(&headers) {
        Ok(Json(IndexResponse {
            latest_question_list: questions.iter().map(QuestionCard::from).collect(),
            user: username.map(str::to_string),
        })
        .into_response())
    } else {
        Ok(render_index(&questions, username).into_response())
    }
}

/// GET /:question_id/
pub async fn detail(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let question_id = parse_question_id(&question_id)?;
    let detail = state.poll_service.question_detail(&question_id).await?;

    Ok(detail_response(&detail, None, &headers))
}

/// GET /:question_id/results/
pub async fn results(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let question_id = parse_question_id(&question_id)?;
    let results = state.poll_service.results(&question_id).await?;

    if wants_json(&headers) {
        Ok(Json(ResultsResponse {
            question: QuestionCard::from(&results.question),
            choices: choice_cards(&results),
            total_votes: results.total_votes(),
        })
        .into_response())
    } else {
        Ok(render_results(&results).into_response())
    }
}

/// POST /:question_id/vote/
///
/// Records a vote and redirects to the results. A missing or unknown choice
/// re-renders the detail page with an error message instead.
pub async fn vote(
    State(state): State<AppState>,
    Path(question_id): Path<String>,
    headers: HeaderMap,
    form: Option<Form<VoteForm>>,
) -> Result<Response, AppError> {
    let question_id = parse_question_id(&question_id)?;
    let submitted = form.and_then(|Form(f)| f.choice);

    match state
        .poll_service
        .vote(&question_id, submitted.as_deref())
        .await
    {
        Ok(_) => Ok(see_other(
            &headers,
            &format!("/{}/results/", question_id),
            None,
        )),
        Err(AppError::Domain(DomainError::Validation(message))) => {
            tracing::debug!(question_id = %question_id, "Rejected vote: {}", message);
            let detail = state.poll_service.question_detail(&question_id).await?;
            Ok(detail_response(&detail, Some(&message), &headers))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vote_form() {
        let form: VoteForm = serde_json::from_str(r#"{"choice": "3"}"#).unwrap();
        assert_eq!(form.choice.as_deref(), Some("3"));
    }

    #[test]
    fn parse_vote_form_missing_choice() {
        let form: VoteForm = serde_json::from_str("{}").unwrap();
        assert!(form.choice.is_none());
    }

    #[test]
    fn question_id_must_be_numeric() {
        assert_eq!(parse_question_id("12").unwrap(), QuestionId(12));
        assert!(matches!(
            parse_question_id("twelve"),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn question_card_links_to_detail() {
        let question = crate::test_utils::test_question(4);
        let card = QuestionCard::from(&question);
        assert_eq!(card.url, "/4/");
        assert_eq!(card.id, 4);
    }
}
