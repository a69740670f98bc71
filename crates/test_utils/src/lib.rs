//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! expense splitting test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built members, rosters and amounts
//! - `builders`: Builder patterns for test expenses
//! - `assertions`: Custom assertion helpers for balances and settlements
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
