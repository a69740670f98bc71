//! Request/Response data transfer objects
//!
//! Field names are camelCase. Amounts leave the API rounded to the
//! currency's minor unit; the domain keeps the full internal precision.

pub mod group;
pub mod expense;
pub mod settlement;
