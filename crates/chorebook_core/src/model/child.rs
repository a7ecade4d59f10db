//! Child domain model.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ChildId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Child {
    pub id: ChildId,
    pub name: String,
    pub display_order: i64,
    #[serde(serialize_with = "crate::model::timestamp::serialize")]
    pub created_at: NaiveDateTime,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChildPatch {
    pub name: Option<String>,
    pub display_order: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildValidationError {
    EmptyName,
}

impl Display for ChildValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => f.write_str("Name is required"),
        }
    }
}

impl Error for ChildValidationError {}

pub fn normalize_name(name: &str) -> Result<String, ChildValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ChildValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}
