//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Manual mocks instead of mockall: the port traits take `&str` and
//! borrowed ids, and these mocks double as small working stores that tests
//! can inspect after the fact.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
