//! Membership types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Membership types an operator may assign, in upgrade order
pub const MEMBERSHIP_TYPES: &[&str] = &[
    "NonMember",
    "Exhibitor",
    "Helper",
    "Supporter",
    "KidInTow",
    "Child",
    "Youth",
    "FirstWorldcon",
    "Adult",
];

const DAY_PASS_PREFIX: &str = "DP";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown membership type: {0}")]
pub struct UnknownMembership(pub String);

/// Membership of a person record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Membership {
    NonMember,
    Exhibitor,
    Helper,
    Supporter,
    KidInTow,
    Child,
    Youth,
    FirstWorldcon,
    Adult,
    /// Day pass; holds the full type string including the `DP` prefix
    DayPass(String),
}

impl Membership {
    pub fn as_str(&self) -> &str {
        match self {
            Membership::NonMember => "NonMember",
            Membership::Exhibitor => "Exhibitor",
            Membership::Helper => "Helper",
            Membership::Supporter => "Supporter",
            Membership::KidInTow => "KidInTow",
            Membership::Child => "Child",
            Membership::Youth => "Youth",
            Membership::FirstWorldcon => "FirstWorldcon",
            Membership::Adult => "Adult",
            Membership::DayPass(s) => s,
        }
    }

    pub fn is_day_pass(&self) -> bool {
        matches!(self, Membership::DayPass(_))
    }

    /// Dialog heading for a record with this membership
    pub fn title(&self, member_number: Option<i64>) -> String {
        match self {
            Membership::NonMember => "Non-member".to_string(),
            Membership::DayPass(s) => {
                format!("Day pass:{}", s.strip_prefix(DAY_PASS_PREFIX).unwrap_or(s))
            }
            other => match member_number {
                Some(n) => format!("Member #{} ({})", n, other),
                None => format!("Member #? ({})", other),
            },
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Membership {
    type Err = UnknownMembership;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "NonMember" => Membership::NonMember,
            "Exhibitor" => Membership::Exhibitor,
            "Helper" => Membership::Helper,
            "Supporter" => Membership::Supporter,
            "KidInTow" => Membership::KidInTow,
            "Child" => Membership::Child,
            "Youth" => Membership::Youth,
            "FirstWorldcon" => Membership::FirstWorldcon,
            "Adult" => Membership::Adult,
            dp if dp.starts_with(DAY_PASS_PREFIX) => Membership::DayPass(dp.to_string()),
            other => return Err(UnknownMembership(other.to_string())),
        })
    }
}

impl TryFrom<String> for Membership {
    type Error = UnknownMembership;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Membership> for String {
    fn from(value: Membership) -> Self {
        value.as_str().to_string()
    }
}
