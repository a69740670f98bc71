//! Comprehensive tests for domain_expense

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, DomainPort, GroupId, Money, PortError};
use domain_expense::{
    calculate_balances, plan_settlements, BalanceCalculator, BalanceMap, Expense, ExpenseError,
    ExpenseStore, GroupLedger, Member, Roster, RosterSource, SettleUpService, SettlementPlanner, SplitPolicy,
    UnknownMemberPolicy, DEFAULT_TOLERANCE,
};
use test_utils::{
    assert_conserved, assert_decimal_approx_eq, assert_net, assert_settlements_clear, expense,
    ledger_strategy, balanced_nets_strategy, member, ExpenseBuilder, RosterFixtures,
};

fn settlement_triples(balances: &BalanceMap) -> Vec<(String, String, Decimal)> {
    plan_settlements(balances)
        .unwrap()
        .into_iter()
        .map(|s| (s.from.to_string(), s.to.to_string(), s.amount.amount()))
        .collect()
}

// ============================================================================
// Scenario Tests
// ============================================================================

mod scenario_tests {
    use super::*;

    #[test]
    fn test_single_payer_split_three_ways() {
        let roster = RosterFixtures::abc();
        let expenses = vec![expense(dec!(300), "A", &["A", "B", "C"])];

        let balances = calculate_balances(Currency::INR, &roster, &expenses).unwrap();

        assert_eq!(balances.get("A").unwrap().paid.amount(), dec!(300));
        for name in ["A", "B", "C"] {
            assert_eq!(balances.get(name).unwrap().owed.amount(), dec!(100));
        }
        assert_net(&balances, "A", dec!(200));
        assert_net(&balances, "B", dec!(-100));
        assert_net(&balances, "C", dec!(-100));

        assert_eq!(
            settlement_triples(&balances),
            vec![
                ("B".to_string(), "A".to_string(), dec!(100)),
                ("C".to_string(), "A".to_string(), dec!(100)),
            ]
        );
    }

    #[test]
    fn test_mutual_expenses_cancel_out() {
        let roster = RosterFixtures::abc();
        let expenses = vec![
            expense(dec!(100), "A", &["A", "B"]),
            expense(dec!(100), "B", &["A", "B"]),
        ];

        let balances = calculate_balances(Currency::INR, &roster, &expenses).unwrap();

        for name in ["A", "B", "C"] {
            assert!(balances.get(name).unwrap().net.is_zero());
        }
        assert!(balances.is_settled(Decimal::ZERO));
        assert!(plan_settlements(&balances).unwrap().is_empty());
    }

    #[test]
    fn test_odd_split_stays_within_tolerance() {
        let roster = RosterFixtures::abc();
        let expenses = vec![expense(dec!(100), "A", &["A", "B", "C"])];

        let balances = calculate_balances(Currency::INR, &roster, &expenses).unwrap();

        assert_eq!(balances.get("B").unwrap().owed.amount(), dec!(33.3333));
        assert_decimal_approx_eq(
            balances.total_paid().amount(),
            balances.total_owed().amount(),
            DEFAULT_TOLERANCE,
        );
        assert_conserved(&balances, DEFAULT_TOLERANCE);

        let settlements = plan_settlements(&balances).unwrap();
        assert_eq!(settlements.len(), 2);
        assert_settlements_clear(&balances, &settlements, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_empty_split_is_rejected_before_any_division() {
        let unchecked = ExpenseBuilder::new()
            .with_amount(dec!(100))
            .paid_by("A")
            .split_between(&[])
            .build_unchecked();

        let result = calculate_balances(Currency::INR, &RosterFixtures::abc(), &[unchecked]);
        assert!(matches!(result, Err(ExpenseError::InvalidSplit { .. })));

        let built = ExpenseBuilder::new().split_between(&[]).try_build();
        assert!(matches!(built, Err(ExpenseError::InvalidSplit { .. })));
    }

    #[test]
    fn test_default_group_dinner_and_taxi() {
        let roster = RosterFixtures::default_group();
        let expenses = vec![
            expense(dec!(1200), "You", &["You", "Alice", "Bob", "Charlie"]),
            expense(dec!(300), "Alice", &["Alice", "Bob", "Charlie"]),
        ];

        let balances = calculate_balances(Currency::INR, &roster, &expenses).unwrap();
        assert_net(&balances, "You", dec!(900));
        assert_net(&balances, "Alice", dec!(-100));
        assert_net(&balances, "Bob", dec!(-400));
        assert_net(&balances, "Charlie", dec!(-400));

        assert_eq!(
            settlement_triples(&balances),
            vec![
                ("Alice".to_string(), "You".to_string(), dec!(100)),
                ("Bob".to_string(), "You".to_string(), dec!(400)),
                ("Charlie".to_string(), "You".to_string(), dec!(400)),
            ]
        );
    }
}

// ============================================================================
// Validation Tests
// ============================================================================

mod validation_tests {
    use super::*;

    #[test]
    fn test_unchecked_non_positive_amount_is_rejected() {
        let zero = ExpenseBuilder::new().with_amount(dec!(0)).build_unchecked();
        let result = calculate_balances(Currency::INR, &RosterFixtures::abc(), &[zero]);
        assert!(matches!(result, Err(ExpenseError::InvalidAmount { .. })));
    }

    #[test]
    fn test_unknown_split_member_is_rejected() {
        let result = calculate_balances(
            Currency::INR,
            &RosterFixtures::abc(),
            &[expense(dec!(90), "A", &["A", "Zed"])],
        );
        match result {
            Err(ExpenseError::UnknownMember(name)) => assert_eq!(name, "Zed"),
            other => panic!("Expected UnknownMember, got {:?}", other),
        }
    }

    #[test]
    fn test_auto_register_keeps_roster_first() {
        let balances = BalanceCalculator::new(Currency::INR)
            .with_unknown_member_policy(UnknownMemberPolicy::AutoRegister)
            .calculate(
                &RosterFixtures::abc(),
                &[expense(dec!(90), "Zed", &["A", "Zed", "Yan"])],
            )
            .unwrap();

        let names: Vec<&str> = balances.members().map(Member::name).collect();
        assert_eq!(names, vec!["A", "B", "C", "Zed", "Yan"]);
        assert_net(&balances, "Zed", dec!(60));
        assert_net(&balances, "Yan", dec!(-30));
    }

    #[test]
    fn test_mismatched_currency_is_rejected() {
        let usd = ExpenseBuilder::new()
            .with_money(Money::new(dec!(10), Currency::USD))
            .build();
        let result = calculate_balances(Currency::INR, &RosterFixtures::abc(), &[usd]);
        assert!(matches!(result, Err(ExpenseError::Calculation(_))));
    }

    #[test]
    fn test_invalid_input_classification() {
        assert!(ExpenseError::unknown_member("Z").is_invalid_input());
        assert!(!ExpenseError::UnbalancedLedger {
            residual: dec!(1),
            tolerance: DEFAULT_TOLERANCE,
        }
        .is_invalid_input());
    }
}

// ============================================================================
// Rounding Policy Tests
// ============================================================================

mod rounding_tests {
    use super::*;

    #[test]
    fn test_minor_units_split_conserves_exactly() {
        let expenses = vec![
            expense(dec!(100), "A", &["A", "B", "C"]),
            expense(dec!(10), "B", &["A", "B", "C"]),
        ];

        let balances = BalanceCalculator::new(Currency::INR)
            .with_split_policy(SplitPolicy::MinorUnits)
            .calculate(&RosterFixtures::abc(), &expenses)
            .unwrap();

        assert_eq!(balances.total_paid(), balances.total_owed());
        assert!(balances.net_total().is_zero());

        let settlements = SettlementPlanner::new(Decimal::ZERO).plan(&balances).unwrap();
        assert_settlements_clear(&balances, &settlements, Decimal::ZERO);
    }

    #[test]
    fn test_long_ledger_of_odd_splits_still_settles() {
        let payers = ["A", "B", "C", "D"];
        let expenses: Vec<Expense> = (0..400)
            .map(|i| {
                let split: &[&str] = if i % 2 == 0 { &["A", "B", "C"] } else { &["A", "B", "C", "D"] };
                let amount = Decimal::new(10_001 + i, 2);
                expense(amount, payers[i as usize % payers.len()], split)
            })
            .collect();

        let balances = calculate_balances(Currency::INR, &RosterFixtures::abcd(), &expenses).unwrap();
        assert!(balances.net_total().amount().abs() <= dec!(0.0002));

        let settlements = plan_settlements(&balances).unwrap();
        assert_settlements_clear(&balances, &settlements, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_repeated_three_way_split_keeps_residue_below_tolerance() {
        let expenses = vec![expense(dec!(100), "A", &["A", "B", "C"]); 101];

        let balances = calculate_balances(Currency::INR, &RosterFixtures::abc(), &expenses).unwrap();
        assert_net(&balances, "B", dec!(-3366.6667));
        assert_net(&balances, "A", dec!(6733.3333));

        let settlements = plan_settlements(&balances).unwrap();
        assert_eq!(settlements.len(), 2);
        assert_settlements_clear(&balances, &settlements, DEFAULT_TOLERANCE);
    }

    #[test]
    fn test_zero_tolerance_rejects_exact_split_residue() {
        let balances = calculate_balances(
            Currency::INR,
            &RosterFixtures::abc(),
            &[expense(dec!(100), "A", &["A", "B", "C"])],
        )
        .unwrap();

        let result = SettlementPlanner::new(Decimal::ZERO).plan(&balances);
        assert!(matches!(result, Err(ExpenseError::UnbalancedLedger { .. })));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #[test]
        fn prop_paid_equals_owed((roster, expenses) in ledger_strategy()) {
            let balances = calculate_balances(Currency::INR, &roster, &expenses).unwrap();
            let diff = (balances.total_paid().amount() - balances.total_owed().amount()).abs();
            prop_assert!(diff <= DEFAULT_TOLERANCE);
        }

        #[test]
        fn prop_nets_sum_to_zero((roster, expenses) in ledger_strategy()) {
            let balances = calculate_balances(Currency::INR, &roster, &expenses).unwrap();
            prop_assert!(balances.net_total().amount().abs() <= DEFAULT_TOLERANCE);
        }

        #[test]
        fn prop_repeated_calls_agree((roster, expenses) in ledger_strategy()) {
            let first = calculate_balances(Currency::INR, &roster, &expenses).unwrap();
            let second = calculate_balances(Currency::INR, &roster, &expenses).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(plan_settlements(&first).unwrap(), plan_settlements(&second).unwrap());
        }

        #[test]
        fn prop_expense_order_does_not_matter((roster, expenses) in ledger_strategy()) {
            let forward = calculate_balances(Currency::INR, &roster, &expenses).unwrap();
            let reversed: Vec<Expense> = expenses.iter().rev().cloned().collect();
            let backward = calculate_balances(Currency::INR, &roster, &reversed).unwrap();
            prop_assert_eq!(forward, backward);
        }

        #[test]
        fn prop_settlements_clear_all_nets((roster, expenses) in ledger_strategy()) {
            let balances = calculate_balances(Currency::INR, &roster, &expenses).unwrap();
            let settlements = plan_settlements(&balances).unwrap();
            assert_settlements_clear(&balances, &settlements, DEFAULT_TOLERANCE);
        }

        #[test]
        fn prop_settlement_count_is_bounded((roster, expenses) in ledger_strategy()) {
            let balances = calculate_balances(Currency::INR, &roster, &expenses).unwrap();
            let settlements = plan_settlements(&balances).unwrap();
            let debtors = balances.iter().filter(|(_, b)| b.is_debtor()).count();
            let creditors = balances.iter().filter(|(_, b)| b.is_creditor()).count();
            if debtors == 0 || creditors == 0 {
                prop_assert!(settlements.is_empty());
            } else {
                prop_assert!(settlements.len() <= debtors + creditors - 1);
            }
        }

        #[test]
        fn prop_balanced_nets_plan_exactly(nets in balanced_nets_strategy()) {
            let balances = BalanceMap::from_nets(
                Currency::INR,
                nets.iter().map(|(n, v)| (member(n), *v)),
            )
            .unwrap();
            let settlements = SettlementPlanner::new(Decimal::ZERO).plan(&balances).unwrap();
            assert_settlements_clear(&balances, &settlements, Decimal::ZERO);
        }
    }
}

// ============================================================================
// Service Tests
// ============================================================================

mod service_tests {
    use super::*;

    struct MockLedger {
        rosters: HashMap<GroupId, Roster>,
        expenses: HashMap<GroupId, Vec<Expense>>,
    }

    impl DomainPort for MockLedger {}

    #[async_trait]
    impl ExpenseStore for MockLedger {
        async fn list_expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, PortError> {
            self.expenses
                .get(&group_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Group", group_id))
        }
    }

    #[async_trait]
    impl RosterSource for MockLedger {
        async fn roster(&self, group_id: GroupId) -> Result<Roster, PortError> {
            self.rosters
                .get(&group_id)
                .cloned()
                .ok_or_else(|| PortError::not_found("Group", group_id))
        }
    }

    #[async_trait]
    impl GroupLedger for MockLedger {
        async fn ledger(&self, group_id: GroupId) -> Result<(Roster, Vec<Expense>), PortError> {
            Ok((self.roster(group_id).await?, self.list_expenses(group_id).await?))
        }
    }

    /// Separate reads see a roster from before the latest member joined
    struct LaggingLedger {
        stale: Roster,
        current: (Roster, Vec<Expense>),
    }

    impl DomainPort for LaggingLedger {}

    #[async_trait]
    impl ExpenseStore for LaggingLedger {
        async fn list_expenses(&self, _group_id: GroupId) -> Result<Vec<Expense>, PortError> {
            Ok(self.current.1.clone())
        }
    }

    #[async_trait]
    impl RosterSource for LaggingLedger {
        async fn roster(&self, _group_id: GroupId) -> Result<Roster, PortError> {
            Ok(self.stale.clone())
        }
    }

    #[async_trait]
    impl GroupLedger for LaggingLedger {
        async fn ledger(&self, _group_id: GroupId) -> Result<(Roster, Vec<Expense>), PortError> {
            Ok(self.current.clone())
        }
    }

    fn service_with(group_id: GroupId, roster: Roster, expenses: Vec<Expense>) -> SettleUpService {
        let ledger = Arc::new(MockLedger {
            rosters: HashMap::from([(group_id, roster)]),
            expenses: HashMap::from([(group_id, expenses)]),
        });
        SettleUpService::new(
            ledger,
            BalanceCalculator::new(Currency::INR),
            SettlementPlanner::default(),
        )
    }

    #[tokio::test]
    async fn test_report_for_stored_group() {
        let group_id = GroupId::new();
        let service = service_with(
            group_id,
            RosterFixtures::abc(),
            vec![
                expense(dec!(300), "A", &["A", "B", "C"]),
                expense(dec!(60), "B", &["B", "C"]),
            ],
        );

        let report = service.report(group_id).await.unwrap();

        assert_eq!(report.summary.expense_count, 2);
        assert_eq!(report.summary.total.amount(), dec!(360));
        assert_net(&report.balances, "A", dec!(200));
        assert_net(&report.balances, "B", dec!(-70));
        assert_net(&report.balances, "C", dec!(-130));
        assert_eq!(report.settlements.len(), 2);
        assert_eq!(report.settlements[0].amount.amount(), dec!(70));
    }

    #[tokio::test]
    async fn test_settlements_match_report() {
        let group_id = GroupId::new();
        let service = service_with(
            group_id,
            RosterFixtures::abcd(),
            vec![expense(dec!(400), "D", &["A", "B", "C", "D"])],
        );

        let settlements = service.settlements(group_id).await.unwrap();
        let report = service.report(group_id).await.unwrap();
        assert_eq!(settlements, report.settlements);
        assert_eq!(settlements.len(), 3);
        assert!(settlements.iter().all(|s| s.to.name() == "D"));
    }

    #[tokio::test]
    async fn test_report_uses_one_consistent_snapshot() {
        let current = (
            RosterFixtures::abcd(),
            vec![expense(dec!(40), "D", &["A", "D"])],
        );
        let service = SettleUpService::new(
            Arc::new(LaggingLedger {
                stale: RosterFixtures::abc(),
                current,
            }),
            BalanceCalculator::new(Currency::INR),
            SettlementPlanner::default(),
        );

        let report = service.report(GroupId::new()).await.unwrap();
        assert_net(&report.balances, "D", dec!(20));
        assert_net(&report.balances, "A", dec!(-20));
        assert_eq!(report.settlements.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_group_surfaces_port_error() {
        let service = service_with(GroupId::new(), RosterFixtures::abc(), vec![]);
        let result = service.balances(GroupId::new()).await;

        match result {
            Err(ExpenseError::Port(e)) => assert!(e.is_not_found()),
            other => panic!("Expected port error, got {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_without_ports() {
        let service = service_with(GroupId::new(), Roster::new(), vec![]);
        let report = service
            .evaluate(&RosterFixtures::abc(), &[expense(dec!(30), "C", &["A", "B", "C"])])
            .unwrap();

        assert_eq!(report.summary.total.amount(), dec!(30));
        assert_eq!(report.settlements.len(), 2);
        assert_eq!(service.planner().tolerance(), DEFAULT_TOLERANCE);
        assert_eq!(service.calculator().currency(), Currency::INR);
    }
}
