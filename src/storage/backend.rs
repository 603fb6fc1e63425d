//! StudentStore - Backend trait
//!
//! TigerStyle: Every backend honors the same contract, so the API layer
//! holds an `Arc<dyn StudentStore>` and never knows which one it talks to.

use async_trait::async_trait;

use super::error::StoreResult;
use super::record::{NewStudent, StudentPatch, StudentRecord};

/// Persistent collection of student records.
///
/// Implementations enforce uniqueness of `email` and `roll_number` and run
/// record validation before every write.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All records, in the backend's natural order.
    async fn list(&self) -> StoreResult<Vec<StudentRecord>>;

    /// One record by id.
    ///
    /// Fails with `NotFound` if the id does not resolve.
    async fn get(&self, id: &str) -> StoreResult<StudentRecord>;

    /// Validate and insert a new record.
    ///
    /// Fails with `Validation` on a missing field, out-of-range gpa, or a
    /// duplicate email/roll number.
    async fn create(&self, input: NewStudent) -> StoreResult<StudentRecord>;

    /// Apply a partial update.
    ///
    /// Fails with `NotFound` if the id does not resolve, and with
    /// `Validation` if the merged record is invalid or collides with a
    /// different record on a unique field.
    async fn update(&self, id: &str, patch: StudentPatch) -> StoreResult<StudentRecord>;

    /// Permanently remove a record.
    ///
    /// Fails with `NotFound` if the id does not resolve.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Number of records.
    async fn count(&self) -> StoreResult<usize>;
}
