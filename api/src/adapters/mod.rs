//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgres;
pub mod upstream;

pub use postgres::{PostgresChoiceRepository, PostgresIdentityProvider, PostgresQuestionRepository};
pub use upstream::HttpFeedClient;
