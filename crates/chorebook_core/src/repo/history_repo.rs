//! Completion history queries.
//!
//! # Invariants
//! - History joins completions with chores regardless of `is_active`, so
//!   soft-deleted chores keep their past completions visible.
//! - Rows come back ordered `date DESC, child name ASC, completed_at ASC`.

use crate::model::child::ChildId;
use crate::model::chore::ChoreId;
use crate::repo::{date_to_db, parse_date, parse_timestamp_column, RepoResult};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};

/// One completion joined with its chore and child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub date: NaiveDate,
    pub completed_at: NaiveDateTime,
    pub chore_id: ChoreId,
    pub chore_title: String,
    pub child_id: ChildId,
    pub child_name: String,
}

/// Inclusive date range with an optional child filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub child_id: Option<ChildId>,
}

pub trait HistoryRepository {
    fn list_completions(&self, query: &HistoryQuery) -> RepoResult<Vec<HistoryRow>>;
}

#[derive(Clone, Copy)]
pub struct SqliteHistoryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHistoryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl HistoryRepository for SqliteHistoryRepository<'_> {
    fn list_completions(&self, query: &HistoryQuery) -> RepoResult<Vec<HistoryRow>> {
        let mut sql = String::from(
            "SELECT
                cc.date AS date,
                cc.completed_at AS completed_at,
                c.id AS chore_id,
                c.title AS chore_title,
                ch.id AS child_id,
                ch.name AS child_name
             FROM chore_completions cc
             JOIN chores c ON cc.chore_id = c.id
             JOIN children ch ON c.child_id = ch.id
             WHERE cc.date >= ? AND cc.date <= ?",
        );
        let mut bind_values = vec![
            Value::Text(date_to_db(query.start)),
            Value::Text(date_to_db(query.end)),
        ];

        if let Some(child_id) = query.child_id {
            sql.push_str(" AND ch.id = ?");
            bind_values.push(Value::Integer(child_id));
        }

        sql.push_str(" ORDER BY cc.date DESC, ch.name ASC, ch.id ASC, cc.completed_at ASC, cc.id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut history = Vec::new();
        while let Some(row) = rows.next()? {
            history.push(parse_history_row(row)?);
        }

        Ok(history)
    }
}

fn parse_history_row(row: &Row<'_>) -> RepoResult<HistoryRow> {
    let date: String = row.get("date")?;
    let completed_at: String = row.get("completed_at")?;
    Ok(HistoryRow {
        date: parse_date(&date, "chore_completions.date")?,
        completed_at: parse_timestamp_column(&completed_at, "chore_completions.completed_at")?,
        chore_id: row.get("chore_id")?,
        chore_title: row.get("chore_title")?,
        child_id: row.get("child_id")?,
        child_name: row.get("child_name")?,
    })
}
