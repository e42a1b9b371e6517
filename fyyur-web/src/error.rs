//! Error types for fyyur-web
//!
//! Route handlers return [`AppError`]; each variant maps to a rendered page.
//! Validation failures are not errors here: handlers redisplay the form.

use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use crate::ui::{not_found_page, server_error_page};

#[derive(Debug, Error)]
pub enum AppError {
    /// Entity or route absent (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// A write failed and its transaction was rolled back (500 + message)
    #[error("{message}")]
    Persistence {
        message: String,
        #[source]
        source: fyyur_common::Error,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Common(#[from] fyyur_common::Error),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn persistence(message: impl Into<String>, source: impl Into<fyyur_common::Error>) -> Self {
        AppError::Persistence {
            message: message.into(),
            source: source.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => {
                tracing::debug!(what = %what, "Not found");
                not_found_page().into_response()
            }
            AppError::Persistence { message, source } => {
                error!(error = %source, "{}", message);
                server_error_page(Some(&message)).into_response()
            }
            AppError::Database(ref err) => {
                error!(error = %err, "Unhandled database error");
                server_error_page(None).into_response()
            }
            AppError::Common(ref err) => {
                error!(error = %err, "Unhandled error");
                server_error_page(None).into_response()
            }
        }
    }
}
