//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::time::from_unix;

/// Venue row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    /// Genre display names, in the order they were selected
    #[sqlx(json)]
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Artist row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub website_link: Option<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    #[sqlx(json)]
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Show row: one venue, one artist, one start time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

impl<'r> FromRow<'r, SqliteRow> for Show {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            venue_id: row.try_get("venue_id")?,
            artist_id: row.try_get("artist_id")?,
            start_time: from_unix(row.try_get("start_time")?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_in_memory;
    use chrono::TimeZone;

    #[tokio::test]
    async fn test_venue_genres_decode_from_json_text() {
        let pool = init_in_memory().await.unwrap();
        sqlx::query(
            "INSERT INTO venues (name, address, city, state, genres, seeking_talent)
             VALUES ('The Musical Hop', '1015 Folsom Street', 'San Francisco', 'CA', '[\"Jazz\",\"Reggae\"]', 1)",
        )
        .execute(&pool)
        .await
        .unwrap();

        let venue: Venue = sqlx::query_as("SELECT * FROM venues")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(venue.name, "The Musical Hop");
        assert_eq!(venue.genres, vec!["Jazz", "Reggae"]);
        assert!(venue.seeking_talent);
        assert_eq!(venue.phone, None);
    }

    #[tokio::test]
    async fn test_show_start_time_decodes_from_unix_seconds() {
        let pool = init_in_memory().await.unwrap();
        sqlx::query("INSERT INTO venues (name, address, city, state) VALUES ('V', 'A', 'C', 'CA')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO artists (name, city, state) VALUES ('B', 'C', 'CA')")
            .execute(&pool)
            .await
            .unwrap();

        let start = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        sqlx::query("INSERT INTO shows (venue_id, artist_id, start_time) VALUES (1, 1, ?)")
            .bind(start.timestamp())
            .execute(&pool)
            .await
            .unwrap();

        let show: Show = sqlx::query_as("SELECT id, venue_id, artist_id, start_time FROM shows")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(show.venue_id, 1);
        assert_eq!(show.artist_id, 1);
        assert_eq!(show.start_time, start);
    }
}
