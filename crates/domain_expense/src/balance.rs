//! Per-member balance calculation
//!
//! Balances are derived from scratch on every call: nothing is cached and
//! nothing is stored between calls.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, MoneyError};
use crate::error::ExpenseError;
use crate::expense::Expense;
use crate::member::{Member, Roster};

/// What a member has paid, what they owe, and the difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Balance {
    /// Sum of the expenses this member paid for
    pub paid: Money,
    /// Sum of this member's shares
    pub owed: Money,
    /// `paid - owed`; positive means the group owes this member
    pub net: Money,
}

impl Balance {
    fn new(paid: Money, owed: Money) -> Result<Self, ExpenseError> {
        let net = paid.checked_sub(&owed)?;
        Ok(Self { paid, owed, net })
    }

    /// Returns true if the member owes money to the group
    pub fn is_debtor(&self) -> bool {
        self.net.is_negative()
    }

    /// Returns true if the group owes money to the member
    pub fn is_creditor(&self) -> bool {
        self.net.is_positive()
    }
}

/// How references to members missing from the roster are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownMemberPolicy {
    /// Fail with `UnknownMember`
    #[default]
    Reject,
    /// Append the member after the roster with a zero starting balance
    AutoRegister,
}

/// How an expense amount is divided between participants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPolicy {
    /// Everyone owes `amount / n`; owed totals are rounded to the internal
    /// Money precision once per member
    #[default]
    Exact,
    /// Whole minor units; leftover units go to the earliest participants
    MinorUnits,
}

/// Balances keyed by member, in roster order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalanceMap {
    currency: Currency,
    entries: IndexMap<Member, Balance>,
}

impl BalanceMap {
    /// Builds a balance map from precomputed net positions
    ///
    /// `paid` and `owed` are derived from the sign of each net, so this is
    /// only meant for hosts that already track nets themselves.
    pub fn from_nets(
        currency: Currency,
        nets: impl IntoIterator<Item = (Member, Decimal)>,
    ) -> Result<Self, ExpenseError> {
        let mut entries = IndexMap::new();
        for (member, net) in nets {
            let paid = Money::new(net.max(Decimal::ZERO), currency);
            let owed = Money::new((-net).max(Decimal::ZERO), currency);
            if entries.contains_key(&member) {
                return Err(ExpenseError::DuplicateMember(member.to_string()));
            }
            entries.insert(member, Balance::new(paid, owed)?);
        }
        Ok(Self { currency, entries })
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn get(&self, name: &str) -> Option<&Balance> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Member, Balance> {
        self.entries.iter()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total paid across all members
    pub fn total_paid(&self) -> Money {
        self.total(|b| b.paid)
    }

    /// Total owed across all members
    pub fn total_owed(&self) -> Money {
        self.total(|b| b.owed)
    }

    /// Sum of all nets; zero up to rounding for a closed set of expenses
    pub fn net_total(&self) -> Money {
        self.total(|b| b.net)
    }

    /// Returns true if every member's net is within `tolerance` of zero
    pub fn is_settled(&self, tolerance: Decimal) -> bool {
        self.entries
            .values()
            .all(|b| b.net.amount().abs() <= tolerance)
    }

    fn total(&self, field: impl Fn(&Balance) -> Money) -> Money {
        let sum: Decimal = self.entries.values().map(|b| field(b).amount()).sum();
        Money::new(sum, self.currency)
    }
}

impl<'a> IntoIterator for &'a BalanceMap {
    type Item = (&'a Member, &'a Balance);
    type IntoIter = indexmap::map::Iter<'a, Member, Balance>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Running totals for one member while expenses are folded in
///
/// Exact-split amounts are summed per participant count and divided only
/// when the fold is done, so the owed total is rounded once per member and
/// does not depend on expense order.
#[derive(Debug, Clone)]
struct Tally {
    paid: Money,
    /// Shares that are already whole minor units
    owed: Decimal,
    /// Undivided exact-split amounts keyed by participant count
    pending: BTreeMap<usize, Decimal>,
}

impl Tally {
    fn zero(currency: Currency) -> Self {
        Self {
            paid: Money::zero(currency),
            owed: Decimal::ZERO,
            pending: BTreeMap::new(),
        }
    }

    fn owe(&mut self, share: Decimal) -> Result<(), MoneyError> {
        self.owed = self.owed.checked_add(share).ok_or(MoneyError::Overflow)?;
        Ok(())
    }

    fn owe_part(&mut self, amount: Decimal, parts: usize) -> Result<(), MoneyError> {
        let total = self.pending.entry(parts).or_insert(Decimal::ZERO);
        *total = total.checked_add(amount).ok_or(MoneyError::Overflow)?;
        Ok(())
    }

    fn total_owed(&self, currency: Currency) -> Result<Money, MoneyError> {
        let owed = self.pending.iter().try_fold(self.owed, |acc, (parts, amount)| {
            let share = amount
                .checked_div(Decimal::from(*parts))
                .ok_or(MoneyError::DivisionByZero)?;
            acc.checked_add(share).ok_or(MoneyError::Overflow)
        })?;
        Ok(Money::new(owed, currency))
    }
}

/// Reduces a roster and its expenses to per-member balances
///
/// # Example
///
/// ```rust
/// use core_kernel::{Currency, Money};
/// use domain_expense::{BalanceCalculator, Expense, Member, Roster};
/// use rust_decimal_macros::dec;
///
/// let roster = Roster::from_names(["A", "B", "C"]).unwrap();
/// let everyone: Vec<Member> = roster.iter().cloned().collect();
/// let dinner = Expense::new(
///     "Dinner",
///     Money::new(dec!(300), Currency::INR),
///     Member::new("A").unwrap(),
///     everyone,
/// )
/// .unwrap();
///
/// let balances = BalanceCalculator::new(Currency::INR)
///     .calculate(&roster, &[dinner])
///     .unwrap();
/// assert_eq!(balances.get("A").unwrap().net.amount(), dec!(200));
/// assert_eq!(balances.get("B").unwrap().net.amount(), dec!(-100));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BalanceCalculator {
    currency: Currency,
    unknown_members: UnknownMemberPolicy,
    split: SplitPolicy,
}

impl BalanceCalculator {
    /// Creates a calculator that rejects unknown members and splits exactly
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            unknown_members: UnknownMemberPolicy::default(),
            split: SplitPolicy::default(),
        }
    }

    pub fn with_unknown_member_policy(mut self, policy: UnknownMemberPolicy) -> Self {
        self.unknown_members = policy;
        self
    }

    pub fn with_split_policy(mut self, policy: SplitPolicy) -> Self {
        self.split = policy;
        self
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn unknown_member_policy(&self) -> UnknownMemberPolicy {
        self.unknown_members
    }

    pub fn split_policy(&self) -> SplitPolicy {
        self.split
    }

    /// Computes `{paid, owed, net}` for every roster member
    ///
    /// Every roster member appears in the result, in roster order, even if
    /// no expense mentions them. Expense order does not affect the result.
    ///
    /// # Errors
    ///
    /// - `InvalidSplit` / `InvalidAmount` for a malformed expense
    /// - `UnknownMember` for a reference outside the roster under
    ///   [`UnknownMemberPolicy::Reject`]
    /// - `Calculation` if an expense is in a different currency
    pub fn calculate(&self, roster: &Roster, expenses: &[Expense]) -> Result<BalanceMap, ExpenseError> {
        let mut tallies: IndexMap<Member, Tally> = roster
            .iter()
            .map(|member| (member.clone(), Tally::zero(self.currency)))
            .collect();

        for expense in expenses {
            expense.validate()?;

            let payer = self.tally_for(&mut tallies, &expense.paid_by)?;
            payer.paid = payer.paid.checked_add(&expense.amount)?;

            match self.split {
                SplitPolicy::Exact => {
                    let parts = expense.participant_count();
                    for member in &expense.split_between {
                        self.tally_for(&mut tallies, member)?
                            .owe_part(expense.amount.amount(), parts)?;
                    }
                }
                SplitPolicy::MinorUnits => {
                    let shares = self.minor_unit_shares(expense)?;
                    for (member, share) in expense.split_between.iter().zip(shares) {
                        self.tally_for(&mut tallies, member)?.owe(share.amount())?;
                    }
                }
            }
        }

        let entries = tallies
            .into_iter()
            .map(|(member, tally)| -> Result<_, ExpenseError> {
                let owed = tally.total_owed(self.currency)?;
                Ok((member, Balance::new(tally.paid, owed)?))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        Ok(BalanceMap {
            currency: self.currency,
            entries,
        })
    }

    /// One whole-minor-unit share per participant, in `split_between` order
    fn minor_unit_shares(&self, expense: &Expense) -> Result<Vec<Money>, ExpenseError> {
        let parts = u32::try_from(expense.participant_count())
            .map_err(|_| ExpenseError::invalid_split(expense.id, "too many participants"))?;
        Ok(expense.amount.allocate(parts)?)
    }

    fn tally_for<'a>(
        &self,
        tallies: &'a mut IndexMap<Member, Tally>,
        member: &Member,
    ) -> Result<&'a mut Tally, ExpenseError> {
        if !tallies.contains_key(member) {
            match self.unknown_members {
                UnknownMemberPolicy::Reject => {
                    return Err(ExpenseError::unknown_member(member.name()));
                }
                UnknownMemberPolicy::AutoRegister => {
                    tallies.insert(member.clone(), Tally::zero(self.currency));
                }
            }
        }
        tallies
            .get_mut(member)
            .ok_or_else(|| ExpenseError::unknown_member(member.name()))
    }
}
