//! Group members and the ordered roster
//!
//! Members are identified by name only. The roster keeps insertion order
//! because settlement output is ordered by roster position.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::ExpenseError;

/// A group member, keyed by a trimmed, non-empty name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Member(String);

impl Member {
    /// Creates a member from a display name
    ///
    /// # Errors
    ///
    /// Returns `InvalidMember` if the name is blank
    pub fn new(name: impl Into<String>) -> Result<Self, ExpenseError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ExpenseError::InvalidMember(name));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the member's name
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Member {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Member {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Member {
    type Error = ExpenseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Member::new(value)
    }
}

impl TryFrom<&str> for Member {
    type Error = ExpenseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Member::new(value)
    }
}

impl From<Member> for String {
    fn from(member: Member) -> String {
        member.0
    }
}

/// Ordered set of members belonging to one group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Member>", into = "Vec<Member>")]
pub struct Roster {
    members: IndexSet<Member>,
}

impl Roster {
    /// Creates an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a roster from members in order
    ///
    /// # Errors
    ///
    /// Returns `DuplicateMember` if a name appears twice
    pub fn from_members(members: impl IntoIterator<Item = Member>) -> Result<Self, ExpenseError> {
        let mut roster = Self::new();
        for member in members {
            roster.add(member)?;
        }
        Ok(roster)
    }

    /// Builds a roster from raw names in order
    pub fn from_names<I, S>(names: I) -> Result<Self, ExpenseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::new();
        for name in names {
            roster.add(Member::new(name)?)?;
        }
        Ok(roster)
    }

    /// Appends a member at the end of the roster
    pub fn add(&mut self, member: Member) -> Result<(), ExpenseError> {
        if self.members.contains(&member) {
            return Err(ExpenseError::DuplicateMember(member.to_string()));
        }
        self.members.insert(member);
        Ok(())
    }

    /// Removes a member, keeping the order of the remaining ones
    pub fn remove(&mut self, name: &str) -> Result<Member, ExpenseError> {
        self.members
            .shift_take(name)
            .ok_or_else(|| ExpenseError::unknown_member(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl TryFrom<Vec<Member>> for Roster {
    type Error = ExpenseError;

    fn try_from(members: Vec<Member>) -> Result<Self, Self::Error> {
        Roster::from_members(members)
    }
}

impl From<Roster> for Vec<Member> {
    fn from(roster: Roster) -> Vec<Member> {
        roster.members.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Member;
    type IntoIter = indexmap::set::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
