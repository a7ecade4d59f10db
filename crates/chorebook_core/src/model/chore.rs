//! Chore domain model.
//!
//! # Responsibility
//! - Define the chore record and its frequency classes.
//! - Validate user-supplied titles and frequency names.
//!
//! # Invariants
//! - `frequency` is one of daily/weekly/monthly/oneoff; absent means daily.
//! - `is_active == false` hides a chore from due-state but keeps its history.

use crate::model::child::ChildId;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub type ChoreId = i64;

/// How often a chore needs to be done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
    /// Valid on its creation day only.
    OneOff,
}

impl Frequency {
    pub const ALL: [Frequency; 4] = [
        Frequency::Daily,
        Frequency::Weekly,
        Frequency::Monthly,
        Frequency::OneOff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::OneOff => "oneoff",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|frequency| frequency.as_str() == value)
    }

    /// Sort rank used when listing a child's chores.
    pub fn rank(self) -> u8 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 2,
            Self::Monthly => 3,
            Self::OneOff => 4,
        }
    }

    /// Whether the period is exactly one calendar day.
    pub fn is_single_day(self) -> bool {
        matches!(self, Self::Daily | Self::OneOff)
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ChoreValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value).ok_or_else(|| ChoreValidationError::InvalidFrequency(value.to_string()))
    }
}

/// Validation failures for user-supplied chore fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoreValidationError {
    EmptyTitle,
    InvalidFrequency(String),
}

impl Display for ChoreValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => f.write_str("Title is required"),
            Self::InvalidFrequency(_) => {
                let names = Frequency::ALL.map(Frequency::as_str).join(", ");
                write!(f, "Invalid frequency. Must be one of: {names}")
            }
        }
    }
}

impl Error for ChoreValidationError {}

/// Trims a title and rejects it when nothing is left.
pub fn normalize_title(title: &str) -> Result<String, ChoreValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ChoreValidationError::EmptyTitle);
    }
    Ok(trimmed.to_string())
}

/// Persisted chore record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chore {
    pub id: ChoreId,
    pub child_id: ChildId,
    pub title: String,
    pub frequency: Frequency,
    pub display_order: i64,
    pub is_active: bool,
    #[serde(serialize_with = "crate::model::timestamp::serialize")]
    pub created_at: NaiveDateTime,
}

/// Insert payload for a new chore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChore {
    pub child_id: ChildId,
    pub title: String,
    pub frequency: Frequency,
    pub display_order: i64,
    pub created_at: NaiveDateTime,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChorePatch {
    pub title: Option<String>,
    pub frequency: Option<String>,
    pub display_order: Option<i64>,
}
