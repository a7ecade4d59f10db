//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the store operations the chore core consumes.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it.
//! - A duplicate `(chore_id, date)` completion surfaces as
//!   `RepoError::DuplicateCompletion`, never as a raw constraint error.

use crate::db::DbError;
use crate::model::chore::ChoreId;
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod child_repo;
pub mod chore_repo;
pub mod history_repo;
pub mod settings_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Target row of an update does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// A completion for this chore and date is already stored.
    DuplicateCompletion { chore_id: ChoreId, date: NaiveDate },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DuplicateCompletion { chore_id, date } => {
                write!(f, "chore {chore_id} already has a completion on {date}")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::DuplicateCompletion { .. } => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

pub(crate) fn parse_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}

pub(crate) fn parse_date(value: &str, column: &str) -> RepoResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!("invalid date value `{value}` in {column}"))
    })
}

pub(crate) fn parse_timestamp_column(
    value: &str,
    column: &str,
) -> RepoResult<chrono::NaiveDateTime> {
    crate::model::timestamp::parse_timestamp(value).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid timestamp value `{value}` in {column}"))
    })
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
