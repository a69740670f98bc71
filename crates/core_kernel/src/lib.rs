//! Core Kernel - Foundational types shared by the expense workspace
//!
//! This crate provides the building blocks used by the domain and API crates:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers for groups and expenses
//! - The error type that port adapters report through

pub mod money;
pub mod identifiers;
pub mod ports;
pub mod error;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{GroupId, ExpenseId};
pub use ports::{PortError, DomainPort};
pub use error::CoreError;
