//! Chore schema steps.
//!
//! The schema version lives in `PRAGMA user_version`. Each step runs in its own
//! transaction together with the version bump, so an interrupted upgrade
//! resumes from the last step that committed.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "children_chores_completions",
        sql: include_str!("0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "one_completion_per_chore_day",
        sql: include_str!("0002_completion_unique.sql"),
    },
];

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |step| step.version)
}

/// Schema version recorded in the store.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Brings the store up to [`latest_version`].
///
/// Returns the number of steps applied.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        warn!("event=db_migrate module=db status=rejected found={found} supported={supported}");
        return Err(DbError::SchemaTooNew { found, supported });
    }

    let mut applied = 0;
    for step in STEPS.iter().filter(|step| step.version > found) {
        run_step(conn, step)?;
        info!(
            "event=db_migrate module=db status=ok version={} step={}",
            step.version, step.name
        );
        applied += 1;
    }
    Ok(applied)
}

fn run_step(conn: &mut Connection, step: &SchemaStep) -> DbResult<()> {
    let failed = |source: rusqlite::Error| DbError::Migration {
        version: step.version,
        step: step.name,
        source,
    };

    let tx = conn.transaction().map_err(failed)?;
    tx.execute_batch(step.sql).map_err(failed)?;
    tx.pragma_update(None, "user_version", step.version)
        .map_err(failed)?;
    tx.commit().map_err(failed)
}

#[cfg(test)]
mod tests {
    use super::STEPS;

    #[test]
    fn steps_are_numbered_from_one_without_gaps() {
        for (index, step) in STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "step {}", step.name);
        }
    }
}
