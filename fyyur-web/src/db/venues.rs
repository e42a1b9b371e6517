//! Venue queries

use chrono::{DateTime, Utc};
use fyyur_common::db::Venue;
use fyyur_common::Result;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, SqliteConnection};

use super::{name_matches, upcoming_cutoff, EntitySummary, NamedRef, ShowEntry};
use crate::forms::VenueInput;

/// Venue with its area and upcoming-show count, for the directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// Every venue with its upcoming-show count, ordered by state, city, name
pub async fn list_with_upcoming(
    conn: &mut SqliteConnection,
    now: DateTime<Utc>,
) -> Result<Vec<VenueSummary>> {
    let venues = sqlx::query_as::<_, VenueSummary>(
        r#"
        SELECT v.id, v.name, v.city, v.state, COUNT(s.id) AS num_upcoming_shows
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time >= ?
        GROUP BY v.id
        ORDER BY v.state, v.city, v.name COLLATE NOCASE, v.id
        "#,
    )
    .bind(upcoming_cutoff(now))
    .fetch_all(&mut *conn)
    .await?;

    Ok(venues)
}

/// Venues whose name contains `term`, ignoring case
///
/// The term is matched literally, so `%` and `_` are not wildcards. An empty
/// term matches every venue.
pub async fn search(
    conn: &mut SqliteConnection,
    term: &str,
    now: DateTime<Utc>,
) -> Result<Vec<EntitySummary>> {
    let venues = sqlx::query_as::<_, EntitySummary>(
        r#"
        SELECT v.id, v.name, COUNT(s.id) AS num_upcoming_shows
        FROM venues v
        LEFT JOIN shows s ON s.venue_id = v.id AND s.start_time >= ?
        GROUP BY v.id
        ORDER BY v.name COLLATE NOCASE, v.id
        "#,
    )
    .bind(upcoming_cutoff(now))
    .fetch_all(&mut *conn)
    .await?;

    Ok(venues
        .into_iter()
        .filter(|entry| name_matches(&entry.name, term))
        .collect())
}

pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Venue>> {
    let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(venue)
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(exists)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM venues")
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// Id/name pairs for pickers, ordered by name
pub async fn list_names(conn: &mut SqliteConnection) -> Result<Vec<NamedRef>> {
    let venues = sqlx::query_as::<_, NamedRef>(
        "SELECT id, name FROM venues ORDER BY name COLLATE NOCASE, id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(venues)
}

/// Shows booked at a venue, with the performing artist, ordered by start time
pub async fn shows_for_venue(conn: &mut SqliteConnection, venue_id: i64) -> Result<Vec<ShowEntry>> {
    let shows = sqlx::query_as::<_, ShowEntry>(
        r#"
        SELECT a.id AS counterpart_id,
               a.name AS counterpart_name,
               a.image_link AS counterpart_image_link,
               s.start_time
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(venue_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(shows)
}

/// Insert a venue, returning its id
pub async fn insert(conn: &mut SqliteConnection, venue: &VenueInput) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, address, city, state, phone, website_link, facebook_link,
            image_link, genres, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.address)
    .bind(&venue.city)
    .bind(venue.state.as_ref())
    .bind(&venue.phone)
    .bind(&venue.website_link)
    .bind(&venue.facebook_link)
    .bind(&venue.image_link)
    .bind(Json(venue.genre_names()))
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite every editable field; false when no such venue
pub async fn update(conn: &mut SqliteConnection, id: i64, venue: &VenueInput) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, address = ?, city = ?, state = ?, phone = ?,
            website_link = ?, facebook_link = ?, image_link = ?, genres = ?,
            seeking_talent = ?, seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&venue.name)
    .bind(&venue.address)
    .bind(&venue.city)
    .bind(venue.state.as_ref())
    .bind(&venue.phone)
    .bind(&venue.website_link)
    .bind(&venue.facebook_link)
    .bind(&venue.image_link)
    .bind(Json(venue.genre_names()))
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Delete a venue and (by cascade) its shows; false when no such venue
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
