//! Request handlers

pub mod health;
pub mod groups;
pub mod expenses;
pub mod settlements;
