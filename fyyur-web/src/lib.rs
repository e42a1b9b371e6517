//! fyyur-web library interface
//!
//! Exposes the router and its building blocks for the binary and for
//! integration tests.

pub mod aggregate;
pub mod api;
pub mod db;
pub mod error;
pub mod flash;
pub mod forms;
pub mod seed;
pub mod ui;

pub use crate::error::{AppError, AppResult};

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use fyyur_common::{Clock, SystemClock};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Source of "now" for past/upcoming classification
    pub clock: Arc<dyn Clock>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(db: SqlitePool) -> Self {
        Self::with_clock(db, Arc::new(SystemClock))
    }

    pub fn with_clock(db: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            db,
            clock,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::home_routes())
        .merge(api::venue_routes())
        .merge(api::artist_routes())
        .merge(api::show_routes())
        .merge(api::health_routes())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
