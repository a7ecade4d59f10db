//! Chore and completion store contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the point/range lookups the period logic is built on.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Chore rows are only ever deactivated here, never deleted.
//! - Range lookups treat `start` as inclusive and have no upper bound; callers
//!   pass the current period start, so "today" is the implicit end.
//! - Completion ordering for "most recent" is `date DESC, completed_at DESC, id DESC`.

use crate::model::child::ChildId;
use crate::model::chore::{Chore, ChoreId, Frequency, NewChore};
use crate::model::completion::Completion;
use crate::model::timestamp::format_timestamp;
use crate::repo::{
    bool_to_int, date_to_db, parse_bool, parse_date, parse_timestamp_column, RepoError,
    RepoResult,
};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};

const CHORE_SELECT_SQL: &str = "SELECT
    id,
    child_id,
    title,
    frequency,
    display_order,
    is_active,
    created_at
FROM chores";

const COMPLETION_SELECT_SQL: &str = "SELECT
    id,
    chore_id,
    date,
    completed_at
FROM chore_completions";

/// Store operations consumed by the chore lifecycle, ledger and resolver.
pub trait ChoreRepository {
    fn child_exists(&self, child_id: ChildId) -> RepoResult<bool>;
    fn create_chore(&self, chore: &NewChore) -> RepoResult<ChoreId>;
    /// Writes title, frequency and display order of an existing chore.
    fn update_chore(&self, chore: &Chore) -> RepoResult<()>;
    fn get_chore(&self, id: ChoreId) -> RepoResult<Option<Chore>>;
    fn list_active_chores_for_child(&self, child_id: ChildId) -> RepoResult<Vec<Chore>>;
    /// `max(display_order) + 1` over the child's chores of one frequency, or 1.
    fn next_display_order(&self, child_id: ChildId, frequency: Frequency) -> RepoResult<i64>;
    fn set_chore_active(&self, id: ChoreId, active: bool) -> RepoResult<()>;
    /// Active one-off chores with any completion dated before `date`.
    fn list_chore_ids_with_completion_before(&self, date: NaiveDate) -> RepoResult<Vec<ChoreId>>;
    /// Active one-off chores created before `date` with no completion on their creation day.
    fn list_chore_ids_created_before_without_same_day_completion(
        &self,
        date: NaiveDate,
    ) -> RepoResult<Vec<ChoreId>>;
    fn find_completion(&self, chore_id: ChoreId, date: NaiveDate) -> RepoResult<Option<Completion>>;
    /// Most recent completion dated on or after `start`.
    fn find_completion_in_range(
        &self,
        chore_id: ChoreId,
        start: NaiveDate,
    ) -> RepoResult<Option<Completion>>;
    fn insert_completion(
        &self,
        chore_id: ChoreId,
        date: NaiveDate,
        completed_at: NaiveDateTime,
    ) -> RepoResult<Completion>;
    fn delete_completion(&self, chore_id: ChoreId, date: NaiveDate) -> RepoResult<usize>;
    fn delete_completions_in_range(&self, chore_id: ChoreId, start: NaiveDate) -> RepoResult<usize>;
}

/// SQLite-backed chore repository.
#[derive(Clone, Copy)]
pub struct SqliteChoreRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChoreRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_ids(&self, sql: &str, date: NaiveDate) -> RepoResult<Vec<ChoreId>> {
        let mut stmt = self.conn.prepare(sql)?;
        let ids = stmt
            .query_map([date_to_db(date)], |row| row.get::<_, ChoreId>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }

    fn query_one_completion(
        &self,
        sql: &str,
        chore_id: ChoreId,
        date: NaiveDate,
    ) -> RepoResult<Option<Completion>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params![chore_id, date_to_db(date)])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_completion_row(row)?)),
            None => Ok(None),
        }
    }
}

impl ChoreRepository for SqliteChoreRepository<'_> {
    fn child_exists(&self, child_id: ChildId) -> RepoResult<bool> {
        let exists = self
            .conn
            .query_row("SELECT 1 FROM children WHERE id = ?1;", [child_id], |_| Ok(()))
            .optional()?
            .is_some();
        Ok(exists)
    }

    fn create_chore(&self, chore: &NewChore) -> RepoResult<ChoreId> {
        self.conn.execute(
            "INSERT INTO chores (
                child_id,
                title,
                frequency,
                display_order,
                is_active,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, 1, ?5);",
            params![
                chore.child_id,
                chore.title.as_str(),
                chore.frequency.as_str(),
                chore.display_order,
                format_timestamp(&chore.created_at),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_chore(&self, chore: &Chore) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE chores
             SET
                title = ?1,
                frequency = ?2,
                display_order = ?3
             WHERE id = ?4;",
            params![
                chore.title.as_str(),
                chore.frequency.as_str(),
                chore.display_order,
                chore.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "chore",
                id: chore.id,
            });
        }

        Ok(())
    }

    fn get_chore(&self, id: ChoreId) -> RepoResult<Option<Chore>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHORE_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_chore_row(row)?));
        }

        Ok(None)
    }

    fn list_active_chores_for_child(&self, child_id: ChildId) -> RepoResult<Vec<Chore>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CHORE_SELECT_SQL}
             WHERE child_id = ?1
               AND is_active = 1
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([child_id])?;
        let mut chores = Vec::new();
        while let Some(row) = rows.next()? {
            chores.push(parse_chore_row(row)?);
        }

        Ok(chores)
    }

    fn next_display_order(&self, child_id: ChildId, frequency: Frequency) -> RepoResult<i64> {
        let max_order: Option<i64> = self.conn.query_row(
            "SELECT MAX(display_order)
             FROM chores
             WHERE child_id = ?1
               AND COALESCE(frequency, 'daily') = ?2;",
            params![child_id, frequency.as_str()],
            |row| row.get(0),
        )?;

        Ok(max_order.unwrap_or(0) + 1)
    }

    fn set_chore_active(&self, id: ChoreId, active: bool) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE chores SET is_active = ?1 WHERE id = ?2;",
            params![bool_to_int(active), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "chore",
                id,
            });
        }

        Ok(())
    }

    fn list_chore_ids_with_completion_before(&self, date: NaiveDate) -> RepoResult<Vec<ChoreId>> {
        self.query_ids(
            "SELECT c.id
             FROM chores c
             WHERE c.frequency = 'oneoff'
               AND c.is_active = 1
               AND EXISTS (
                   SELECT 1
                   FROM chore_completions cc
                   WHERE cc.chore_id = c.id
                     AND cc.date < ?1
               )
             ORDER BY c.id ASC;",
            date,
        )
    }

    fn list_chore_ids_created_before_without_same_day_completion(
        &self,
        date: NaiveDate,
    ) -> RepoResult<Vec<ChoreId>> {
        self.query_ids(
            "SELECT c.id
             FROM chores c
             WHERE c.frequency = 'oneoff'
               AND c.is_active = 1
               AND date(c.created_at) < ?1
               AND NOT EXISTS (
                   SELECT 1
                   FROM chore_completions cc
                   WHERE cc.chore_id = c.id
                     AND cc.date = date(c.created_at)
               )
             ORDER BY c.id ASC;",
            date,
        )
    }

    fn find_completion(&self, chore_id: ChoreId, date: NaiveDate) -> RepoResult<Option<Completion>> {
        self.query_one_completion(
            &format!(
                "{COMPLETION_SELECT_SQL}
                 WHERE chore_id = ?1
                   AND date = ?2
                 ORDER BY completed_at DESC, id DESC
                 LIMIT 1;"
            ),
            chore_id,
            date,
        )
    }

    fn find_completion_in_range(
        &self,
        chore_id: ChoreId,
        start: NaiveDate,
    ) -> RepoResult<Option<Completion>> {
        self.query_one_completion(
            &format!(
                "{COMPLETION_SELECT_SQL}
                 WHERE chore_id = ?1
                   AND date >= ?2
                 ORDER BY date DESC, completed_at DESC, id DESC
                 LIMIT 1;"
            ),
            chore_id,
            start,
        )
    }

    fn insert_completion(
        &self,
        chore_id: ChoreId,
        date: NaiveDate,
        completed_at: NaiveDateTime,
    ) -> RepoResult<Completion> {
        let inserted = self.conn.execute(
            "INSERT INTO chore_completions (chore_id, date, completed_at)
             VALUES (?1, ?2, ?3);",
            params![chore_id, date_to_db(date), format_timestamp(&completed_at)],
        );

        match inserted {
            Ok(_) => Ok(Completion {
                id: self.conn.last_insert_rowid(),
                chore_id,
                date,
                completed_at,
            }),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
                    && err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                Err(RepoError::DuplicateCompletion { chore_id, date })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn delete_completion(&self, chore_id: ChoreId, date: NaiveDate) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM chore_completions WHERE chore_id = ?1 AND date = ?2;",
            params![chore_id, date_to_db(date)],
        )?;
        Ok(removed)
    }

    fn delete_completions_in_range(&self, chore_id: ChoreId, start: NaiveDate) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM chore_completions WHERE chore_id = ?1 AND date >= ?2;",
            params![chore_id, date_to_db(start)],
        )?;
        Ok(removed)
    }
}

fn parse_chore_row(row: &Row<'_>) -> RepoResult<Chore> {
    let frequency = match row.get::<_, Option<String>>("frequency")? {
        None => Frequency::default(),
        Some(value) => Frequency::parse(&value).ok_or_else(|| {
            RepoError::InvalidData(format!("invalid frequency `{value}` in chores.frequency"))
        })?,
    };
    let created_at: String = row.get("created_at")?;

    Ok(Chore {
        id: row.get("id")?,
        child_id: row.get("child_id")?,
        title: row.get("title")?,
        frequency,
        display_order: row.get("display_order")?,
        is_active: parse_bool(row.get("is_active")?, "chores.is_active")?,
        created_at: parse_timestamp_column(&created_at, "chores.created_at")?,
    })
}

fn parse_completion_row(row: &Row<'_>) -> RepoResult<Completion> {
    let date: String = row.get("date")?;
    let completed_at: String = row.get("completed_at")?;

    Ok(Completion {
        id: row.get("id")?,
        chore_id: row.get("chore_id")?,
        date: parse_date(&date, "chore_completions.date")?,
        completed_at: parse_timestamp_column(&completed_at, "chore_completions.completed_at")?,
    })
}
