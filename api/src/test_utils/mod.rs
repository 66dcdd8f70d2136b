//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of mockall?
//! - The mocks double as fakes: they store preferences and record post queries
//! - Manual mocks are more explicit and easier to debug
//! - We control exactly what they return without macro magic
//!
//! `AppState` holds its ports as trait objects, so router tests in
//! `integration_tests` plug these mocks straight into the real handlers.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
