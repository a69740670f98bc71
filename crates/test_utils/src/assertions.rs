//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use std::collections::HashMap;

use core_kernel::Money;
use domain_expense::{BalanceMap, Settlement};
use rust_decimal::Decimal;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Arguments
///
/// * `actual` - The actual Money value
/// * `expected` - The expected Money value
/// * `tolerance` - The allowed difference in the amount
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that a decimal value is approximately equal to another
pub fn assert_decimal_approx_eq(actual: Decimal, expected: Decimal, tolerance: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Decimals differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts that the nets of a balance map sum to zero within a tolerance
pub fn assert_conserved(balances: &BalanceMap, tolerance: Decimal) {
    let total = balances.net_total().amount();
    assert!(
        total.abs() <= tolerance,
        "Nets do not sum to zero: total={}, tolerance={}",
        total,
        tolerance
    );
}

/// Asserts the net of one member
pub fn assert_net(balances: &BalanceMap, name: &str, expected: Decimal) {
    let balance = balances
        .get(name)
        .unwrap_or_else(|| panic!("No balance for member {}", name));
    assert_eq!(
        balance.net.amount(),
        expected,
        "Unexpected net for {}: actual={}, expected={}",
        name,
        balance.net.amount(),
        expected
    );
}

/// Asserts that applying the settlements brings every member to zero
///
/// Each payment raises the payer's net and lowers the payee's net by the
/// amount paid. Also checks the structural rules every plan must follow:
/// positive amounts, no self-payments, payers are debtors and payees are
/// creditors.
pub fn assert_settlements_clear(balances: &BalanceMap, settlements: &[Settlement], tolerance: Decimal) {
    let mut nets: HashMap<&str, Decimal> = balances
        .iter()
        .map(|(member, balance)| (member.name(), balance.net.amount()))
        .collect();

    for s in settlements {
        assert!(s.amount.is_positive(), "Non-positive settlement: {:?}", s);
        assert_ne!(s.from, s.to, "Self-payment: {:?}", s);

        let from = balances
            .get(s.from.name())
            .unwrap_or_else(|| panic!("Payer {} not in balances", s.from));
        let to = balances
            .get(s.to.name())
            .unwrap_or_else(|| panic!("Payee {} not in balances", s.to));
        assert!(from.is_debtor(), "Payer {} is not a debtor", s.from);
        assert!(to.is_creditor(), "Payee {} is not a creditor", s.to);

        *nets.entry(s.from.name()).or_default() += s.amount.amount();
        *nets.entry(s.to.name()).or_default() -= s.amount.amount();
    }

    for (name, net) in nets {
        assert!(
            net.abs() <= tolerance,
            "Member {} left with net {} after settlements (tolerance {})",
            name,
            net,
            tolerance
        );
    }
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!("Expected Err matching {}, got Ok({:?})", stringify!($pattern), value),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
