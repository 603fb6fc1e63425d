//! Sample data for a fresh store.

use super::backend::StudentStore;
use super::error::StoreResult;
use super::record::NewStudent;

/// The two sample students a fresh deployment starts with.
#[must_use]
pub fn sample_students() -> Vec<NewStudent> {
    vec![
        NewStudent::new(
            "John Doe",
            "john@example.com",
            "1234567890",
            "STU001",
            "Computer Science",
        )
        .with_gpa(3.8)
        .with_address("123 Main Street"),
        NewStudent::new(
            "Jane Smith",
            "jane@example.com",
            "0987654321",
            "STU002",
            "Information Technology",
        )
        .with_gpa(3.9)
        .with_address("456 Oak Avenue"),
    ]
}

/// Insert the sample students if the store is empty.
///
/// Returns how many records were inserted.
///
/// # Errors
/// Propagates any store error.
pub async fn seed_if_empty(store: &dyn StudentStore) -> StoreResult<usize> {
    let existing = store.count().await?;
    if existing > 0 {
        tracing::info!(existing, "store not empty, skipping sample data");
        return Ok(0);
    }

    let samples = sample_students();
    let inserted = samples.len();
    for sample in samples {
        store.create(sample).await?;
    }

    tracing::info!(inserted, "inserted sample students");
    Ok(inserted)
}
