//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod choice;
pub mod external_post;
pub mod page;
pub mod question;
pub mod user;

pub use choice::{Choice, ChoiceId};
pub use external_post::ExternalPost;
pub use page::{Page, Paginator, EXTERNAL_PAGE_SIZE};
pub use question::{Question, QuestionId, QuestionWithChoices};
pub use user::{NewUser, Session, SessionId, User, UserId};
