//! Child record storage.
//!
//! # Invariants
//! - Listing is deterministic: `display_order ASC, id ASC`.
//! - Deleting a child is a hard delete; chores and completions cascade.

use crate::model::child::{Child, ChildId};
use crate::model::timestamp::format_timestamp;
use crate::repo::{parse_timestamp_column, RepoError, RepoResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, Row};

const CHILD_SELECT_SQL: &str = "SELECT id, name, display_order, created_at FROM children";

pub trait ChildRepository {
    fn create_child(
        &self,
        name: &str,
        display_order: i64,
        created_at: NaiveDateTime,
    ) -> RepoResult<ChildId>;
    fn update_child(&self, child: &Child) -> RepoResult<()>;
    fn get_child(&self, id: ChildId) -> RepoResult<Option<Child>>;
    fn list_children(&self) -> RepoResult<Vec<Child>>;
    fn next_display_order(&self) -> RepoResult<i64>;
    fn delete_child(&self, id: ChildId) -> RepoResult<()>;
}

#[derive(Clone, Copy)]
pub struct SqliteChildRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteChildRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ChildRepository for SqliteChildRepository<'_> {
    fn create_child(
        &self,
        name: &str,
        display_order: i64,
        created_at: NaiveDateTime,
    ) -> RepoResult<ChildId> {
        self.conn.execute(
            "INSERT INTO children (name, display_order, created_at) VALUES (?1, ?2, ?3);",
            params![name, display_order, format_timestamp(&created_at)],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_child(&self, child: &Child) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE children SET name = ?1, display_order = ?2 WHERE id = ?3;",
            params![child.name.as_str(), child.display_order, child.id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "child",
                id: child.id,
            });
        }
        Ok(())
    }

    fn get_child(&self, id: ChildId) -> RepoResult<Option<Child>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CHILD_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_child_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_children(&self) -> RepoResult<Vec<Child>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CHILD_SELECT_SQL} ORDER BY display_order ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut children = Vec::new();
        while let Some(row) = rows.next()? {
            children.push(parse_child_row(row)?);
        }
        Ok(children)
    }

    fn next_display_order(&self) -> RepoResult<i64> {
        let max_order: Option<i64> =
            self.conn
                .query_row("SELECT MAX(display_order) FROM children;", [], |row| {
                    row.get(0)
                })?;
        Ok(max_order.unwrap_or(0) + 1)
    }

    fn delete_child(&self, id: ChildId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM children WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound { entity: "child", id });
        }
        Ok(())
    }
}

fn parse_child_row(row: &Row<'_>) -> RepoResult<Child> {
    let created_at: String = row.get("created_at")?;
    Ok(Child {
        id: row.get("id")?,
        name: row.get("name")?,
        display_order: row.get("display_order")?,
        created_at: parse_timestamp_column(&created_at, "children.created_at")?,
    })
}
