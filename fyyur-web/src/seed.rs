//! Demo data for `--seed-demo`

use chrono::{TimeZone, Utc};
use fyyur_common::{Error, Result};
use sqlx::SqlitePool;
use tracing::info;

use crate::db::{artists, shows, venues};
use crate::forms::{ArtistInput, Genre, ShowInput, UsState, VenueInput};

/// Rows written by a seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

/// Populate demo venues, artists and shows unless any venue or artist exists
///
/// Returns `None` when the database already had data.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<Option<SeedSummary>> {
    let mut tx = pool.begin().await?;

    if venues::count(&mut *tx).await? > 0 || artists::count(&mut *tx).await? > 0 {
        info!("Database already has listings; skipping demo seed");
        return Ok(None);
    }

    let mut venue_ids = Vec::new();
    for venue in demo_venues() {
        venue_ids.push(venues::insert(&mut *tx, &venue).await?);
    }

    let mut artist_ids = Vec::new();
    for artist in demo_artists() {
        artist_ids.push(artists::insert(&mut *tx, &artist).await?);
    }

    // (venue index, artist index, start time)
    let bookings = [
        (0, 0, (2019, 5, 21, 21, 30)),
        (2, 1, (2019, 6, 15, 23, 0)),
        (2, 2, (2035, 4, 1, 20, 0)),
        (2, 2, (2035, 4, 8, 20, 0)),
        (2, 2, (2035, 4, 15, 20, 0)),
    ];
    for (venue, artist, (year, month, day, hour, minute)) in bookings {
        let start_time = Utc
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .ok_or_else(|| Error::Internal(format!("invalid demo date {year}-{month}-{day}")))?;
        let show = ShowInput {
            venue_id: venue_ids[venue],
            artist_id: artist_ids[artist],
            start_time,
        };
        shows::insert(&mut *tx, &show).await?;
    }

    tx.commit().await?;

    let summary = SeedSummary {
        venues: venue_ids.len(),
        artists: artist_ids.len(),
        shows: bookings.len(),
    };
    info!(
        venues = summary.venues,
        artists = summary.artists,
        shows = summary.shows,
        "Seeded demo listings"
    );
    Ok(Some(summary))
}

fn demo_venues() -> Vec<VenueInput> {
    vec![
        VenueInput {
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: UsState::Ca,
            address: "1015 Folsom Street".to_string(),
            phone: Some("123-123-1234".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1543900694-133f37abaaa5?auto=format&fit=crop&w=400&q=60".to_string()),
            genres: vec![Genre::Jazz, Genre::Reggae, Genre::Classical, Genre::Folk],
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            website_link: Some("https://www.themusicalhop.com".to_string()),
            seeking_talent: true,
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us."
                    .to_string(),
            ),
        },
        VenueInput {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: UsState::Ny,
            address: "335 Delancey Street".to_string(),
            phone: Some("914-003-1132".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?auto=format&fit=crop&w=750&q=80".to_string()),
            genres: vec![Genre::Classical, Genre::RnB, Genre::HipHop],
            facebook_link: Some("https://www.facebook.com/theduelingpianos".to_string()),
            website_link: Some("https://www.theduelingpianos.com".to_string()),
            seeking_talent: false,
            seeking_description: None,
        },
        VenueInput {
            name: "Park Square Live Music & Coffee".to_string(),
            city: "San Francisco".to_string(),
            state: UsState::Ca,
            address: "34 Whiskey Moore Ave".to_string(),
            phone: Some("415-000-1234".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?auto=format&fit=crop&w=747&q=80".to_string()),
            genres: vec![Genre::RockNRoll, Genre::Jazz, Genre::Classical, Genre::Folk],
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".to_string()),
            website_link: Some("https://www.parksquarelivemusicandcoffee.com".to_string()),
            seeking_talent: false,
            seeking_description: None,
        },
    ]
}

fn demo_artists() -> Vec<ArtistInput> {
    vec![
        ArtistInput {
            name: "Guns N Petals".to_string(),
            city: "San Francisco".to_string(),
            state: UsState::Ca,
            phone: Some("326-123-5000".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1549213783-8284d0336c4f?auto=format&fit=crop&w=300&q=80".to_string()),
            genres: vec![Genre::RockNRoll],
            facebook_link: Some("https://www.facebook.com/GunsNPetals".to_string()),
            website_link: Some("https://www.gunsnpetalsband.com".to_string()),
            seeking_venue: true,
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".to_string(),
            ),
        },
        ArtistInput {
            name: "Matt Quevedo".to_string(),
            city: "New York".to_string(),
            state: UsState::Ny,
            phone: Some("300-400-5000".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?auto=format&fit=crop&w=334&q=80".to_string()),
            genres: vec![Genre::Jazz],
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".to_string()),
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        },
        ArtistInput {
            name: "The Wild Sax Band".to_string(),
            city: "San Francisco".to_string(),
            state: UsState::Ca,
            phone: Some("432-325-5432".to_string()),
            image_link: Some("https://images.unsplash.com/photo-1558369981-f9ca78462e61?auto=format&fit=crop&w=794&q=80".to_string()),
            genres: vec![Genre::Jazz, Genre::Classical],
            facebook_link: None,
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use fyyur_common::db::init_in_memory;

    #[tokio::test]
    async fn test_seed_runs_once() {
        let pool = init_in_memory().await.unwrap();

        let first = seed_if_empty(&pool).await.unwrap();
        assert_eq!(
            first,
            Some(SeedSummary {
                venues: 3,
                artists: 3,
                shows: 5
            })
        );

        assert_eq!(seed_if_empty(&pool).await.unwrap(), None);

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(shows::count(&mut *conn).await.unwrap(), 5);
    }
}
