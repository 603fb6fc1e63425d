//! Roster - Student Records Service
//!
//! A REST API over a persistent collection of student records.
//!
//! Features:
//! - Five CRUD routes plus a health check, each a single store call
//! - Uniqueness of email and roll number enforced by the store
//! - PostgreSQL in production, an in-memory store for tests and local runs
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────────┐    ┌────────────────┐
//! │ browser UI   │───▶│ api::router (axum)   │───▶│ StudentStore   │
//! │ (refetches)  │◀───│ status + {message}   │◀───│ Memory/Postgres│
//! └──────────────┘    └──────────────────────┘    └────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod storage;

pub use api::{router, ApiError, AppState};
pub use config::Config;
pub use storage::{
    MemoryStore, NewStudent, StoreError, StoreResult, StudentPatch, StudentRecord, StudentStore,
};

#[cfg(feature = "postgres")]
pub use storage::PostgresStore;

/// Application name
pub const APP_NAME: &str = "roster";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
