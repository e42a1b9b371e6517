//! # Fyyur Common Library
//!
//! Shared code for the Fyyur listing service:
//! - Database initialization and row models
//! - Configuration loading (CLI / environment / TOML / defaults)
//! - Clock abstraction for query-time "now"
//! - Common error type

pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
pub use time::{Clock, FixedClock, SystemClock};
