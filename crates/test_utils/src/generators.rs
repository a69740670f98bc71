//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{Currency, Money};
use domain_expense::{Expense, Member, Roster};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for generating currencies with two decimal places
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::INR),
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
    ]
}

/// Strategy for generating valid positive amounts in minor units
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

/// Strategy for generating positive INR amounts
pub fn inr_amount_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::INR))
}

/// Strategy for generating net positions that sum to exactly zero
///
/// The last member absorbs whatever the others leave over.
pub fn balanced_nets_strategy() -> impl Strategy<Value = Vec<(String, Decimal)>> {
    proptest::collection::vec(-1_000_000i64..1_000_000i64, 1..8).prop_map(|minors| {
        let mut nets: Vec<(String, Decimal)> = minors
            .iter()
            .enumerate()
            .map(|(i, m)| (format!("M{}", i), Decimal::new(*m, 2)))
            .collect();
        let total: Decimal = nets.iter().map(|(_, n)| *n).sum();
        nets.push((format!("M{}", minors.len()), -total));
        nets
    })
}

/// Strategy for generating a roster of 2 to 6 members named `M0`, `M1`, ...
pub fn roster_strategy() -> impl Strategy<Value = Roster> {
    (2usize..=6).prop_map(named_roster)
}

/// Strategy for generating a roster together with valid INR expenses
/// that only reference roster members
///
/// Split lists follow roster order. When a generated split would be
/// empty the payer shares the expense alone. Ledgers run to a few hundred
/// expenses so that rounding has room to build up.
pub fn ledger_strategy() -> impl Strategy<Value = (Roster, Vec<Expense>)> {
    (2usize..=8).prop_flat_map(|size| {
        let expense = (
            positive_amount_minor_strategy(),
            0..size,
            proptest::collection::vec(any::<bool>(), size),
        );
        proptest::collection::vec(expense, 0..400).prop_map(move |raw| {
            let roster = named_roster(size);
            let members: Vec<Member> = roster.iter().cloned().collect();
            let expenses = raw
                .into_iter()
                .map(|(minor, payer, mask)| {
                    let mut split: Vec<Member> = members
                        .iter()
                        .zip(&mask)
                        .filter(|(_, selected)| **selected)
                        .map(|(m, _)| m.clone())
                        .collect();
                    if split.is_empty() {
                        split.push(members[payer].clone());
                    }
                    Expense::new(
                        "generated",
                        Money::from_minor(minor, Currency::INR),
                        members[payer].clone(),
                        split,
                    )
                    .expect("generated expenses are valid")
                })
                .collect();
            (roster, expenses)
        })
    })
}

fn named_roster(size: usize) -> Roster {
    Roster::from_names((0..size).map(|i| format!("M{}", i))).expect("generated names are unique")
}
