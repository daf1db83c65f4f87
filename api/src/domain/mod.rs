//! Domain layer
//!
//! Poll, user and feed models plus the port traits the application layer
//! depends on. Nothing in here knows about HTTP or SQL.
//! - `entities`: questions, choices, users, sessions and pagination
//! - `ports`: store, identity provider and upstream feed interfaces

pub mod entities;
pub mod ports;
