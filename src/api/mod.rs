//! API Service
//!
//! TigerStyle: Pure pass-through between HTTP and the record store.
//!
//! | Method | Path | Store call |
//! |---|---|---|
//! | GET | /api/students | `list` |
//! | GET | /api/students/:id | `get` |
//! | POST | /api/students | `create` |
//! | PUT | /api/students/:id | `update` |
//! | DELETE | /api/students/:id | `delete` |
//! | GET | /health | none |

mod error;
mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::storage::StudentStore;

pub use error::ApiError;

/// Shared handler state: the one store handle built at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudentStore>,
}

impl AppState {
    /// Wrap a store handle.
    pub fn new(store: Arc<dyn StudentStore>) -> Self {
        Self { store }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/students",
            get(handlers::list_students).post(handlers::create_student),
        )
        .route(
            "/api/students/:id",
            get(handlers::get_student)
                .put(handlers::update_student)
                .delete(handlers::delete_student),
        )
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
