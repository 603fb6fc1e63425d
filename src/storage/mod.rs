//! Storage - Record Store trait and backends
//!
//! TigerStyle: Abstract storage, one contract, two backends.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    StudentStore Trait                        │
//! └─────────────────────────────────────────────────────────────┘
//!          ↑                              ↑
//!          │                              │
//! ┌────────┴────────┐           ┌────────┴────────┐
//! │   MemoryStore   │           │  PostgresStore  │
//! │ (tests, local)  │           │  (production)   │
//! └─────────────────┘           └─────────────────┘
//! ```

mod backend;
mod error;
mod memory;
mod record;
mod seed;

#[cfg(feature = "postgres")]
mod postgres;

pub use backend::StudentStore;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use record::{validate_new, NewStudent, StudentPatch, StudentRecord};
pub use seed::{sample_students, seed_if_empty};

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
