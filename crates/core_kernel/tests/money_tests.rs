//! Unit tests for the Money module
//!
//! Tests cover money creation, arithmetic operations, allocation,
//! currency handling, and edge cases.

use core_kernel::{Money, Currency, MoneyError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

mod creation {
    use super::*;

    #[test]
    fn test_new_rounds_to_four_decimal_places() {
        let m = Money::new(dec!(100.123456789), Currency::INR);
        assert_eq!(m.amount(), dec!(100.1235));
    }

    #[test]
    fn test_from_minor_converts_paise_correctly() {
        let m = Money::from_minor(10050, Currency::INR);
        assert_eq!(m.amount(), dec!(100.50));
    }

    #[test]
    fn test_from_minor_handles_jpy_no_decimals() {
        let m = Money::from_minor(10000, Currency::JPY);
        assert_eq!(m.amount(), dec!(10000));
    }

    #[test]
    fn test_zero_creates_zero_amount() {
        let m = Money::zero(Currency::EUR);
        assert!(m.is_zero());
        assert_eq!(m.currency(), Currency::EUR);
    }

    #[test]
    fn test_default_currency_is_rupee() {
        assert_eq!(Currency::default(), Currency::INR);
        assert_eq!(Currency::INR.symbol(), "₹");
    }
}

mod predicates {
    use super::*;

    #[test]
    fn test_is_positive_false_for_zero() {
        assert!(!Money::zero(Currency::INR).is_positive());
    }

    #[test]
    fn test_is_negative_false_for_zero() {
        assert!(!Money::zero(Currency::INR).is_negative());
    }

    #[test]
    fn test_difference_of_equal_amounts_is_neither_sign() {
        let a = Money::new(dec!(33.3333), Currency::INR);
        let diff = a.checked_sub(&a).unwrap();
        assert!(diff.is_zero());
        assert!(!diff.is_negative());
        assert!(!diff.is_positive());
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_checked_add_same_currency() {
        let a = Money::new(dec!(100.00), Currency::INR);
        let b = Money::new(dec!(50.00), Currency::INR);
        assert_eq!(a.checked_add(&b).unwrap().amount(), dec!(150.00));
    }

    #[test]
    fn test_checked_sub_can_go_negative() {
        let a = Money::new(dec!(30.00), Currency::INR);
        let b = Money::new(dec!(100.00), Currency::INR);
        assert_eq!(a.checked_sub(&b).unwrap().amount(), dec!(-70.00));
    }

    #[test]
    fn test_checked_sub_currency_mismatch() {
        let a = Money::new(dec!(100.00), Currency::INR);
        let b = Money::new(dec!(50.00), Currency::USD);
        assert!(matches!(a.checked_sub(&b), Err(MoneyError::CurrencyMismatch(_, _))));
    }

    #[test]
    fn test_negation() {
        let m = Money::new(dec!(100.00), Currency::INR);
        assert_eq!((-m).amount(), dec!(-100.00));
    }

    #[test]
    fn test_divide_by_zero_error() {
        let m = Money::new(dec!(100.00), Currency::INR);
        assert!(matches!(m.divide(Decimal::ZERO), Err(MoneyError::DivisionByZero)));
    }

    #[test]
    fn test_divide_by_scalar() {
        let m = Money::new(dec!(100.00), Currency::INR);
        assert_eq!(m.divide(dec!(4)).unwrap().amount(), dec!(25.00));
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round_to_currency_inr() {
        let m = Money::new(dec!(66.6667), Currency::INR);
        assert_eq!(m.round_to_currency().amount(), dec!(66.67));
    }

    #[test]
    fn test_round_to_currency_jpy() {
        let m = Money::new(dec!(100.60), Currency::JPY);
        assert_eq!(m.round_to_currency().amount(), dec!(101));
    }
}

mod allocation {
    use super::*;

    #[test]
    fn test_allocate_zero_parts_fails() {
        let m = Money::new(dec!(100), Currency::INR);
        assert!(matches!(m.allocate(0), Err(MoneyError::InvalidAmount(_))));
    }

    #[test]
    fn test_allocate_gives_remainder_to_first_parts() {
        let m = Money::new(dec!(0.05), Currency::INR);
        let parts: Vec<Decimal> = m.allocate(3).unwrap().iter().map(|p| p.amount()).collect();
        assert_eq!(parts, vec![dec!(0.02), dec!(0.02), dec!(0.01)]);
    }

    #[test]
    fn test_allocate_negative_amount() {
        let m = Money::new(dec!(-0.05), Currency::INR);
        let parts: Vec<Decimal> = m.allocate(3).unwrap().iter().map(|p| p.amount()).collect();
        assert_eq!(parts, vec![dec!(-0.02), dec!(-0.02), dec!(-0.01)]);
    }

    #[test]
    fn test_allocate_single_part_is_identity() {
        let m = Money::new(dec!(12.34), Currency::INR);
        assert_eq!(m.allocate(1).unwrap(), vec![m]);
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_currency_serializes_uppercase() {
        let json = serde_json::to_string(&Currency::INR).unwrap();
        assert_eq!(json, "\"INR\"");

        let parsed: Currency = serde_json::from_str("\"JPY\"").unwrap();
        assert_eq!(parsed, Currency::JPY);
    }
}
