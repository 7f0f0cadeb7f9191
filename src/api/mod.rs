//! HTTP layer.
//!
//! Exposes the task CRUD endpoints under `/api/tasks` and serves the bundled
//! single-page UI at `/`.

mod server;
pub mod templates;

pub use server::{AppState, build_router, serve};
