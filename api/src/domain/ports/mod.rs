//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod feed;
pub mod identity;
pub mod repositories;

pub use feed::FeedClient;
pub use identity::IdentityProvider;
pub use repositories::{ChoiceRepository, QuestionRepository};
