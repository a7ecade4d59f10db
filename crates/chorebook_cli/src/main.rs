//! Chorebook server entry point.
//!
//! Opens (and migrates) the SQLite store, then serves the JSON API and the
//! static web client.

use chorebook_core::db::open_db;
use chorebook_core::{default_log_level, init_logging, SystemClock};
use chorebook_http::{serve, AppState, ServerConfig};
use clap::Parser;
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Household chore tracker", long_about = None)]
struct Args {
    /// Path to the SQLite database file
    #[arg(long, env = "CHOREBOOK_DB", default_value = "data/chores.db")]
    db: PathBuf,

    /// Address to bind
    #[arg(long, env = "CHOREBOOK_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "CHOREBOOK_PORT", default_value_t = 8080)]
    port: u16,

    /// Directory holding the web client
    #[arg(long, env = "CHOREBOOK_STATIC_DIR", default_value = "static")]
    static_dir: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CHOREBOOK_LOG_LEVEL")]
    log_level: Option<String>,

    /// Write rolling log files here instead of stderr
    #[arg(long, env = "CHOREBOOK_LOG_DIR")]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = args.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, args.log_dir.as_deref())?;

    if let Some(parent) = args.db.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let conn = open_db(&args.db)?;
    info!(
        "event=app_start module=cli status=ok version={} db={}",
        env!("CARGO_PKG_VERSION"),
        args.db.display()
    );

    let state = AppState::new(conn, Arc::new(SystemClock));
    let config = ServerConfig {
        host: args.host,
        port: args.port,
        static_dir: args.static_dir,
    };
    serve(config, state).await?;
    Ok(())
}
