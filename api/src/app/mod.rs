//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod auth_service;
pub mod external_feed_service;
pub mod poll_service;

pub use auth_service::{AuthService, RegistrationForm};
pub use external_feed_service::ExternalFeedService;
pub use poll_service::PollService;
