//! MemoryStore - In-process backend
//!
//! TigerStyle: Same contract as the database backend, held in memory.
//! Used by the tests and by local runs without a database URL.
//!
//! The uniqueness check and the write happen under one write guard, so two
//! concurrent creates with the same email cannot both succeed.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::backend::StudentStore;
use super::error::{StoreError, StoreResult};
use super::record::{NewStudent, StudentPatch, StudentRecord};

/// Records by id, plus insertion order.
#[derive(Debug, Default)]
struct Inner {
    records: HashMap<String, StudentRecord>,
    order: Vec<String>,
}

impl Inner {
    /// Duplicate-key error if a record other than `except_id` already holds
    /// the given email or roll number.
    fn find_duplicate(
        &self,
        except_id: Option<&str>,
        email: Option<&str>,
        roll_number: Option<&str>,
    ) -> Option<StoreError> {
        for record in self.records.values() {
            if Some(record.id.as_str()) == except_id {
                continue;
            }
            if let Some(email) = email.filter(|e| *e == record.email) {
                return Some(StoreError::duplicate("email", email));
            }
            if let Some(roll) = roll_number.filter(|r| *r == record.roll_number) {
                return Some(StoreError::duplicate("rollNumber", roll));
            }
        }
        None
    }
}

/// In-memory student store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list(&self) -> StoreResult<Vec<StudentRecord>> {
        let inner = self.inner.read().await;
        Ok(inner
            .order
            .iter()
            .filter_map(|id| inner.records.get(id))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &str) -> StoreResult<StudentRecord> {
        self.inner
            .read()
            .await
            .records
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    async fn create(&self, input: NewStudent) -> StoreResult<StudentRecord> {
        let record = StudentRecord::create(input)?;

        let mut inner = self.inner.write().await;
        if let Some(err) = inner.find_duplicate(
            None,
            Some(record.email.as_str()),
            Some(record.roll_number.as_str()),
        ) {
            return Err(err);
        }

        inner.order.push(record.id.clone());
        inner.records.insert(record.id.clone(), record.clone());

        // Postcondition
        assert_eq!(inner.order.len(), inner.records.len());

        tracing::debug!(id = %record.id, "created student");
        Ok(record)
    }

    async fn update(&self, id: &str, patch: StudentPatch) -> StoreResult<StudentRecord> {
        let mut inner = self.inner.write().await;

        let current = inner
            .records
            .get(id)
            .ok_or_else(|| StoreError::not_found(id))?;
        let merged = current.merge(&patch)?;

        if let Some(err) = inner.find_duplicate(
            Some(id),
            patch.effective_email(),
            patch.effective_roll_number(),
        ) {
            return Err(err);
        }

        inner.records.insert(id.to_string(), merged.clone());

        tracing::debug!(id = %id, "updated student");
        Ok(merged)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let mut inner = self.inner.write().await;

        if inner.records.remove(id).is_none() {
            return Err(StoreError::not_found(id));
        }
        inner.order.retain(|existing| existing != id);

        // Postcondition
        assert_eq!(inner.order.len(), inner.records.len());

        tracing::debug!(id = %id, "deleted student");
        Ok(())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.inner.read().await.records.len())
    }
}

// =============================================================================
// Tests
// =============================================================================
