//! Query layer
//!
//! Every function takes the caller's connection handle (normally the
//! request's transaction, passed as `&mut *tx`); nothing here opens its own
//! connection or commits. Time-relative queries take `now` explicitly.

pub mod artists;
pub mod shows;
pub mod venues;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use fyyur_common::time::from_unix;

/// Id and name of a venue or artist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

/// Search hit / list entry with its upcoming-show count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// One show as seen from a venue or artist detail page
///
/// `counterpart_*` describes the other side of the booking: the artist on
/// a venue page, the venue on an artist page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowEntry {
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for ShowEntry {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            counterpart_id: row.try_get("counterpart_id")?,
            counterpart_name: row.try_get("counterpart_name")?,
            counterpart_image_link: row.try_get("counterpart_image_link")?,
            start_time: from_unix(row.try_get("start_time")?),
        })
    }
}

/// Smallest stored start time that still counts as upcoming
///
/// Start times are whole seconds, so `start >= now` holds exactly when
/// `start >= ceil(now)`.
pub fn upcoming_cutoff(now: DateTime<Utc>) -> i64 {
    if now.timestamp_subsec_nanos() > 0 {
        now.timestamp() + 1
    } else {
        now.timestamp()
    }
}

/// Case-insensitive substring match using Unicode lowercasing
///
/// SQLite's `lower()` only folds ASCII, so name searches filter here.
pub fn name_matches(name: &str, term: &str) -> bool {
    name.to_lowercase().contains(&term.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_name_matches_folds_non_ascii() {
        assert!(name_matches("CAFÉ ÉTOILE", "café"));
        assert!(name_matches("Café Étoile", "ÉTOILE"));
        assert!(name_matches("The Musical Hop", "hop"));
        assert!(name_matches("anything", ""));
        assert!(!name_matches("Café", "cafe"));
    }

    #[test]
    fn test_upcoming_cutoff_rounds_up_partial_seconds() {
        let whole = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(upcoming_cutoff(whole), whole.timestamp());

        let partial = whole + chrono::Duration::milliseconds(250);
        assert_eq!(upcoming_cutoff(partial), whole.timestamp() + 1);
    }
}
