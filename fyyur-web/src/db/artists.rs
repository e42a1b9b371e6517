//! Artist queries

use chrono::{DateTime, Utc};
use fyyur_common::db::Artist;
use fyyur_common::Result;
use sqlx::types::Json;
use sqlx::SqliteConnection;

use super::{name_matches, upcoming_cutoff, EntitySummary, NamedRef, ShowEntry};
use crate::forms::ArtistInput;

/// Every artist, ordered by name
pub async fn list_names(conn: &mut SqliteConnection) -> Result<Vec<NamedRef>> {
    let artists = sqlx::query_as::<_, NamedRef>(
        "SELECT id, name FROM artists ORDER BY name COLLATE NOCASE, id",
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(artists)
}

/// Artists whose name contains `term`, ignoring case
pub async fn search(
    conn: &mut SqliteConnection,
    term: &str,
    now: DateTime<Utc>,
) -> Result<Vec<EntitySummary>> {
    let artists = sqlx::query_as::<_, EntitySummary>(
        r#"
        SELECT a.id, a.name, COUNT(s.id) AS num_upcoming_shows
        FROM artists a
        LEFT JOIN shows s ON s.artist_id = a.id AND s.start_time >= ?
        GROUP BY a.id
        ORDER BY a.name COLLATE NOCASE, a.id
        "#,
    )
    .bind(upcoming_cutoff(now))
    .fetch_all(&mut *conn)
    .await?;

    Ok(artists
        .into_iter()
        .filter(|entry| name_matches(&entry.name, term))
        .collect())
}

pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Option<Artist>> {
    let artist = sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

    Ok(artist)
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(exists)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// Shows an artist plays, with the hosting venue, ordered by start time
pub async fn shows_for_artist(
    conn: &mut SqliteConnection,
    artist_id: i64,
) -> Result<Vec<ShowEntry>> {
    let shows = sqlx::query_as::<_, ShowEntry>(
        r#"
        SELECT v.id AS counterpart_id,
               v.name AS counterpart_name,
               v.image_link AS counterpart_image_link,
               s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
    )
    .bind(artist_id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(shows)
}

pub async fn insert(conn: &mut SqliteConnection, artist: &ArtistInput) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, city, state, phone, website_link, facebook_link,
            image_link, genres, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(artist.state.as_ref())
    .bind(&artist.phone)
    .bind(&artist.website_link)
    .bind(&artist.facebook_link)
    .bind(&artist.image_link)
    .bind(Json(artist.genre_names()))
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .execute(&mut *conn)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn update(conn: &mut SqliteConnection, id: i64, artist: &ArtistInput) -> Result<bool> {
    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, city = ?, state = ?, phone = ?, website_link = ?,
            facebook_link = ?, image_link = ?, genres = ?, seeking_venue = ?,
            seeking_description = ?
        WHERE id = ?
        "#,
    )
    .bind(&artist.name)
    .bind(&artist.city)
    .bind(artist.state.as_ref())
    .bind(&artist.phone)
    .bind(&artist.website_link)
    .bind(&artist.facebook_link)
    .bind(&artist.image_link)
    .bind(Json(artist.genre_names()))
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
