//! HTTP surface for the Chorebook core.
//!
//! # Responsibility
//! - Expose chore, child, history and PIN use-cases as JSON endpoints.
//! - Serve the static web client with single-page-app fallback.
//!
//! # Invariants
//! - Every store access runs under the shared connection lock on a
//!   blocking worker; one request is one unit of work.
//! - Errors are always `{"error": message}` with the mapped status code.

mod error;
mod routes;
mod server;
mod state;

pub use error::ApiError;
pub use server::{api_router, router, serve, ServerConfig};
pub use state::AppState;
