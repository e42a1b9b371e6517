//! HTTP handlers for fyyur-web
//!
//! Each handler opens its own transaction from the pool, passes `&mut *tx`
//! to the query layer, and commits on success. Returning early drops the
//! transaction, which rolls it back.

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use artists::artist_routes;
pub use health::health_routes;
pub use home::home_routes;
pub use shows::show_routes;
pub use venues::venue_routes;

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::ui::{self, Page};

/// Integer `:id` path segment; anything else is a 404
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::NotFound(format!("invalid id: {rejection}")))?;
        Ok(Self(id))
    }
}

/// `search_term` form field of the search boxes
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// JSON body answered by `DELETE /venues/:id` and `DELETE /artists/:id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    #[serde(rename = "homeUrl")]
    pub home_url: String,
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl DeleteResponse {
    pub fn completed(deleted: bool) -> Self {
        Self {
            home_url: "/".to_string(),
            deleted,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            home_url: "/".to_string(),
            deleted: false,
            error: Some(error.into()),
        }
    }
}

/// Fallback for unmatched routes
pub async fn not_found() -> Page {
    ui::not_found_page()
}
