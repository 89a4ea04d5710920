//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! catalog test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built categories and products with fixed values
//! - `builders`: Builders for insert payloads, filled with fake data
//! - `database`: PostgreSQL test containers with the schema applied

pub mod fixtures;
pub mod builders;
pub mod database;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
