//! Pre-built Test Fixtures
//!
//! Provides ready-to-use members, rosters and amounts. These fixtures are
//! designed to be consistent and predictable for unit tests.

use chrono::{DateTime, TimeZone, Utc};
use core_kernel::{Currency, Money};
use domain_expense::{Member, Roster};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Creates a member, panicking on a blank name
pub fn member(name: &str) -> Member {
    Member::new(name).expect("fixture member names are never blank")
}

/// Creates the list of members for a split, in the given order
pub fn members(names: &[&str]) -> Vec<Member> {
    names.iter().map(|n| member(n)).collect()
}

/// Creates a roster from names, panicking on duplicates
pub fn roster(names: &[&str]) -> Roster {
    Roster::from_names(names.iter().copied()).expect("fixture rosters have unique names")
}

/// Fixture for rosters used across the suite
pub struct RosterFixtures;

impl RosterFixtures {
    /// The default group a new user starts with
    pub fn default_group() -> Roster {
        roster(&["You", "Alice", "Bob", "Charlie"])
    }

    /// Three members named by letter
    pub fn abc() -> Roster {
        roster(&["A", "B", "C"])
    }

    /// Four members named by letter
    pub fn abcd() -> Roster {
        roster(&["A", "B", "C", "D"])
    }
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Creates a rupee amount
    pub fn inr(amount: Decimal) -> Money {
        Money::new(amount, Currency::INR)
    }

    /// A round dinner bill
    pub fn inr_300() -> Money {
        Money::new(dec!(300), Currency::INR)
    }

    /// An amount that does not split evenly three ways
    pub fn inr_100() -> Money {
        Money::new(dec!(100), Currency::INR)
    }

    /// Creates a zero amount
    pub fn inr_zero() -> Money {
        Money::zero(Currency::INR)
    }

    /// Creates a USD amount for currency mismatch tests
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }
}

/// Fixture for timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// A fixed recording time
    pub fn recorded_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 19, 30, 0).unwrap()
    }

    /// A recording time one day after [`TemporalFixtures::recorded_at`]
    pub fn next_day() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 16, 19, 30, 0).unwrap()
    }
}
