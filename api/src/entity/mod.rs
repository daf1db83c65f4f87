//! SeaORM entities
//!
//! Table mappings for the poll schema. The schema itself is owned by the
//! migration tooling; these modules only describe it to the ORM.

pub mod auth_user;
pub mod polls_choice;
pub mod polls_question;
pub mod user_sessions;
