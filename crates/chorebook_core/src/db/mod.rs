//! Chore store bootstrap.
//!
//! Every connection the crate hands out comes from [`open_db`] or
//! [`open_db_in_memory`], so callers always see the current chore schema with
//! cascading child deletes switched on.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was last written by a build with more schema steps than this one.
    SchemaTooNew { found: u32, supported: u32 },
    /// A schema step failed; its transaction was rolled back and earlier steps kept.
    Migration {
        version: u32,
        step: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "chore store is at schema v{found} but this build only reads up to v{supported}; upgrade chorebook before opening it"
            ),
            Self::Migration {
                version,
                step,
                source,
            } => write!(f, "schema step v{version} ({step}) failed: {source}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
