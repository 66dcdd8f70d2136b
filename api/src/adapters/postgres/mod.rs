//! PostgreSQL adapters
//!
//! Implementations of repository traits using SeaORM and PostgreSQL.

pub mod preference_repo;


pub use preference_repo::PostgresPreferenceRepository;
