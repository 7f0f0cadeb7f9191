//! Task Store Library
//!
//! A task-tracking backend: CRUD over HTTP for a single `Task` entity backed
//! by SQLite. Layers, outermost first: [`api`] → [`service`] → [`store`].

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod service;
pub mod store;
pub mod types;
