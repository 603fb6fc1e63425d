//! Route handlers
//!
//! Each handler makes exactly one store call and translates the outcome.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use super::error::ApiError;
use super::AppState;
use crate::constants::{HEALTH_STATUS, STUDENT_DELETED_MESSAGE};
use crate::storage::{NewStudent, StudentPatch, StudentRecord};

/// GET /api/students
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentRecord>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/students/:id
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentRecord>, ApiError> {
    Ok(Json(state.store.get(&id).await?))
}

/// POST /api/students
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<StudentRecord>), ApiError> {
    let Json(input) = payload?;
    let record = state.store.create(input).await?;

    tracing::info!(id = %record.id, roll_number = %record.roll_number, "student created");
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/students/:id
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<StudentPatch>, JsonRejection>,
) -> Result<Json<StudentRecord>, ApiError> {
    let Json(patch) = payload?;
    let record = state.store.update(&id, patch).await?;

    tracing::info!(id = %record.id, "student updated");
    Ok(Json(record))
}

/// DELETE /api/students/:id
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.store.delete(&id).await?;

    tracing::info!(id = %id, "student deleted");
    Ok(Json(json!({ "message": STUDENT_DELETED_MESSAGE })))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": HEALTH_STATUS }))
}
