//! Page renderer
//!
//! Renders poll, account and feed pages to plain-text markdown.

use crate::domain::entities::{ExternalPost, Page, Question, QuestionWithChoices};
use crate::error::FieldErrors;

/// Render the index listing
pub fn render_index(questions: &[Question], username: Option<&str>) -> String {
    let mut buf = String::new();

    buf.push_str("# Polls\n\n");
    buf.push_str(&render_account_line(username));

    if questions.is_empty() {
        buf.push_str("_No polls are available._\n");
        return buf;
    }

    for question in questions {
        buf.push_str(&format!(
            "- [{}](/{}/) ({})\n",
            question.question_text,
            question.id,
            question.pub_date.format("%Y-%m-%d %H:%M")
        ));
    }

    buf
}

fn render_account_line(username: Option<&str>) -> String {
    match username {
        Some(name) => format!("Logged in as **{}**. [Log out](/logout/)\n\n", name),
        None => "[Log in](/login/) or [register](/register/)\n\n".to_string(),
    }
}

/// Render a question with its voting form
pub fn render_detail(detail: &QuestionWithChoices, error_message: Option<&str>) -> String {
    let mut buf = String::new();
    let question = &detail.question;

    buf.push_str(&format!("# {}\n\n", question.question_text));

    if let Some(msg) = error_message {
        buf.push_str(&format!("**{}**\n\n", msg));
    }

    if detail.choices.is_empty() {
        buf.push_str("_This question has no choices._\n");
        return buf;
    }

    buf.push_str(&format!(
        "Vote with `POST /{}/vote/` and form field `choice`:\n\n",
        question.id
    ));
    for choice in &detail.choices {
        buf.push_str(&format!("- ( ) `{}` {}\n", choice.id, choice.choice_text));
    }

    buf
}

/// Render the tallies of a question
pub fn render_results(detail: &QuestionWithChoices) -> String {
    let mut buf = String::new();
    let total = detail.total_votes();

    buf.push_str(&format!("# {}\n\n", detail.question.question_text));

    for choice in &detail.choices {
        let noun = if choice.votes == 1 { "vote" } else { "votes" };
        buf.push_str(&format!(
            "- {} -- {} {} ({:.1}%)\n",
            choice.choice_text,
            choice.votes,
            noun,
            choice.percentage_of(total)
        ));
    }

    buf.push_str(&format!("\nTotal: {}\n\n", total));
    buf.push_str(&format!("[Vote again?](/{}/)\n", detail.question.id));

    buf
}

/// Render the registration form with any field errors
pub fn render_register_form(errors: &FieldErrors, username: &str, email: &str) -> String {
    let mut buf = String::new();

    buf.push_str("# Register\n\n");

    if !errors.is_empty() {
        buf.push_str("Please correct the errors below.\n\n");
        for (field, messages) in errors {
            for message in messages {
                buf.push_str(&format!("- {}: {}\n", field, message));
            }
        }
        buf.push('\n');
    }

    buf.push_str("Fields (`POST /register/`):\n\n");
    buf.push_str(&format!("- username: `{}`\n", username));
    buf.push_str(&format!("- email: `{}`\n", email));
    buf.push_str("- password1\n");
    buf.push_str("- password2\n");

    buf
}

/// Render the login form, optionally with an error
pub fn render_login_form(error_message: Option<&str>) -> String {
    let mut buf = String::new();

    buf.push_str("# Log in\n\n");

    if let Some(msg) = error_message {
        buf.push_str(&format!("**{}**\n\n", msg));
    }

    buf.push_str("Fields (`POST /login/`):\n\n");
    buf.push_str("- username\n");
    buf.push_str("- password\n\n");
    buf.push_str("No account? [Register](/register/)\n");

    buf
}

/// Render one page of the external feed
pub fn render_external_page(page: &Page<ExternalPost>) -> String {
    let mut buf = String::new();

    buf.push_str("# External Data\n\n");

    if page.items.is_empty() {
        buf.push_str("_No records._\n");
    } else {
        for post in &page.items {
            buf.push_str(&format!("## {}. {}\n\n", post.id, post.title));
            buf.push_str(&post.body);
            buf.push_str("\n\n");
        }
    }

    buf.push_str("---\n\n");

    let mut nav = Vec::new();
    if let Some(previous) = page.previous_page_number() {
        nav.push("[first](?page=1)".to_string());
        nav.push(format!("[previous](?page={})", previous));
    }
    nav.push(format!("Page {} of {}.", page.number, page.num_pages));
    if let Some(next) = page.next_page_number() {
        nav.push(format!("[next](?page={})", next));
        nav.push(format!("[last](?page={})", page.num_pages));
    }
    buf.push_str(&nav.join(" "));
    buf.push('\n');

    buf
}
