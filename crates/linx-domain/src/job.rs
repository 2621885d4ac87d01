//! Job domain types.

use serde::{Deserialize, Serialize};

/// Employment type of a job posting.
///
/// Wire format: `u8` (0 = FullTime, 1 = PartTime, 2 = Contract,
/// 3 = Internship). JSON format: kebab-case (`"full-time"` etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JobType {
    FullTime = 0,
    PartTime = 1,
    Contract = 2,
    Internship = 3,
}

impl JobType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::FullTime),
            1 => Some(Self::PartTime),
            2 => Some(Self::Contract),
            3 => Some(Self::Internship),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Experience level requested by a posting. Absent means unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry = 0,
    Mid = 1,
    Senior = 2,
    Executive = 3,
}

impl ExperienceLevel {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Entry),
            1 => Some(Self::Mid),
            2 => Some(Self::Senior),
            3 => Some(Self::Executive),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Moderation status of a job posting.
///
/// Transitions: `Pending → Active` (approve), `Pending → Rejected`
/// (reject), any → deleted. There is no path from `Rejected` back to
/// `Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending = 0,
    Active = 1,
    Rejected = 2,
}

impl JobStatus {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Pending),
            1 => Some(Self::Active),
            2 => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Whether a posting in this status appears in public listings.
    pub fn publicly_visible(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}
