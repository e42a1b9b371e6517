//! Show queries

use chrono::{DateTime, Utc};
use fyyur_common::db::Show;
use fyyur_common::time::from_unix;
use fyyur_common::Result;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection};

use crate::forms::ShowInput;

/// Show with both sides named, for the `/shows` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for ShowListing {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            venue_id: row.try_get("venue_id")?,
            venue_name: row.try_get("venue_name")?,
            artist_id: row.try_get("artist_id")?,
            artist_name: row.try_get("artist_name")?,
            artist_image_link: row.try_get("artist_image_link")?,
            start_time: from_unix(row.try_get("start_time")?),
        })
    }
}

/// Every show, ordered by start time
pub async fn list_all(conn: &mut SqliteConnection) -> Result<Vec<ShowListing>> {
    let shows = sqlx::query_as::<_, ShowListing>(
        r#"
        SELECT s.id,
               v.id AS venue_id,
               v.name AS venue_name,
               a.id AS artist_id,
               a.name AS artist_name,
               a.image_link AS artist_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(shows)
}

/// Insert a show and return the stored row; both parents must already exist
pub async fn insert(conn: &mut SqliteConnection, show: &ShowInput) -> Result<Show> {
    let stored = sqlx::query_as::<_, Show>(
        r#"
        INSERT INTO shows (venue_id, artist_id, start_time) VALUES (?, ?, ?)
        RETURNING id, venue_id, artist_id, start_time
        "#,
    )
    .bind(show.venue_id)
    .bind(show.artist_id)
    .bind(show.start_time.timestamp())
    .fetch_one(&mut *conn)
    .await?;

    Ok(stored)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}
