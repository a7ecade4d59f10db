//! Shared handler state and the per-request unit of work.

use crate::error::ApiError;
use chorebook_core::{Clock, ServiceResult};
use log::debug;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// One SQLite connection and one clock shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(conn: Connection, clock: Arc<dyn Clock>) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            clock,
        }
    }

    /// Runs `work` on a blocking worker while holding the connection lock.
    pub(crate) async fn run<T, F>(&self, op: &'static str, work: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection, &dyn Clock) -> ServiceResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let clock = Arc::clone(&self.clock);
        let started_at = Instant::now();

        let result = tokio::task::spawn_blocking(move || {
            let guard = conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            work(&guard, clock.as_ref())
        })
        .await
        .map_err(|err| ApiError::internal(op, err))?;

        debug!(
            "event=http_request module=http op={op} status={} duration_ms={}",
            if result.is_ok() { "ok" } else { "error" },
            started_at.elapsed().as_millis()
        );
        result.map_err(|err| ApiError::from_service(op, err))
    }
}
