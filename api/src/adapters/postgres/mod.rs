//! PostgreSQL adapters
//!
//! Implementations of the store and identity ports using SeaORM and PostgreSQL.

pub mod choice_repo;
pub mod identity_provider;
pub mod question_repo;


pub use choice_repo::PostgresChoiceRepository;
pub use identity_provider::PostgresIdentityProvider;
pub use question_repo::PostgresQuestionRepository;
