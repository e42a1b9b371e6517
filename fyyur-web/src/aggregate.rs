//! View-model assembly
//!
//! Turns query rows into the shapes the pages render: the venue directory
//! grouped by area, search results, and detail views with shows split into
//! past and upcoming at query time.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fyyur_common::db::{Artist, Venue};
use fyyur_common::Result;
use serde::Serialize;
use sqlx::SqliteConnection;

use crate::db::venues::VenueSummary;
use crate::db::{artists, venues, EntitySummary, ShowEntry};

/// One (city, state) group of the venue directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Area {
    pub city: String,
    pub state: String,
    pub venues: Vec<AreaVenue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaVenue {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

impl SearchResults {
    pub fn new(data: Vec<EntitySummary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

/// Shows of one entity split around `now`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShowBuckets {
    pub past_shows: Vec<ShowEntry>,
    pub upcoming_shows: Vec<ShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: ShowBuckets,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: ShowBuckets,
}

/// Upcoming means starting at or after `now`
pub fn is_upcoming(start_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    start_time >= now
}

/// Split shows into past and upcoming, keeping their relative order
pub fn partition_shows(shows: Vec<ShowEntry>, now: DateTime<Utc>) -> ShowBuckets {
    let (upcoming_shows, past_shows): (Vec<_>, Vec<_>) = shows
        .into_iter()
        .partition(|show| is_upcoming(show.start_time, now));

    ShowBuckets {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

/// Group venues by (city, state)
///
/// One area per distinct pair, in first-seen order; venues keep their input
/// order inside an area.
pub fn group_by_area(summaries: Vec<VenueSummary>) -> Vec<Area> {
    let mut areas: Vec<Area> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for summary in summaries {
        let venue = AreaVenue {
            id: summary.id,
            name: summary.name,
            num_upcoming_shows: summary.num_upcoming_shows,
        };

        let key = (summary.city, summary.state);
        match index.get(&key) {
            Some(&position) => areas[position].venues.push(venue),
            None => {
                index.insert(key.clone(), areas.len());
                areas.push(Area {
                    city: key.0,
                    state: key.1,
                    venues: vec![venue],
                });
            }
        }
    }

    areas
}

/// Venue directory, ordered by state then city
pub async fn venue_directory(conn: &mut SqliteConnection, now: DateTime<Utc>) -> Result<Vec<Area>> {
    let summaries = venues::list_with_upcoming(conn, now).await?;
    Ok(group_by_area(summaries))
}

pub async fn search_venues(
    conn: &mut SqliteConnection,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    Ok(SearchResults::new(venues::search(conn, term, now).await?))
}

pub async fn search_artists(
    conn: &mut SqliteConnection,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults> {
    Ok(SearchResults::new(artists::search(conn, term, now).await?))
}

/// Venue with its shows partitioned, or `None` when the id is unknown
pub async fn venue_detail(
    conn: &mut SqliteConnection,
    id: i64,
    now: DateTime<Utc>,
) -> Result<Option<VenueDetail>> {
    let Some(venue) = venues::find(conn, id).await? else {
        return Ok(None);
    };
    let shows = venues::shows_for_venue(conn, id).await?;

    Ok(Some(VenueDetail {
        venue,
        shows: partition_shows(shows, now),
    }))
}

pub async fn artist_detail(
    conn: &mut SqliteConnection,
    id: i64,
    now: DateTime<Utc>,
) -> Result<Option<ArtistDetail>> {
    let Some(artist) = artists::find(conn, id).await? else {
        return Ok(None);
    };
    let shows = artists::shows_for_artist(conn, id).await?;

    Ok(Some(ArtistDetail {
        artist,
        shows: partition_shows(shows, now),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn summary(id: i64, name: &str, city: &str, state: &str) -> VenueSummary {
        VenueSummary {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            num_upcoming_shows: 0,
        }
    }

    fn entry(id: i64, start_time: DateTime<Utc>) -> ShowEntry {
        ShowEntry {
            counterpart_id: id,
            counterpart_name: format!("Artist {id}"),
            counterpart_image_link: None,
            start_time,
        }
    }

    #[test]
    fn test_group_by_area_one_group_per_pair() {
        let areas = group_by_area(vec![
            summary(2, "Dueling Pianos", "New York", "NY"),
            summary(1, "The Musical Hop", "San Francisco", "CA"),
            summary(3, "Park Square", "San Francisco", "CA"),
        ]);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "New York");
        assert_eq!(areas[1].city, "San Francisco");
        let ids: Vec<i64> = areas[1].venues.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_group_by_area_same_city_different_state() {
        let areas = group_by_area(vec![
            summary(1, "A", "Portland", "ME"),
            summary(2, "B", "Portland", "OR"),
        ]);
        assert_eq!(areas.len(), 2);
        assert!(areas.iter().all(|area| area.venues.len() == 1));
    }

    #[test]
    fn test_group_by_area_empty() {
        assert!(group_by_area(Vec::new()).is_empty());
    }

    #[test]
    fn test_partition_shows_around_now() {
        let now = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
        let shows = vec![
            entry(1, now - Duration::days(30)),
            entry(2, now),
            entry(3, now + Duration::days(2)),
            entry(4, now - Duration::seconds(1)),
        ];

        let buckets = partition_shows(shows, now);
        assert_eq!(buckets.past_shows_count, 2);
        assert_eq!(buckets.upcoming_shows_count, 2);
        assert_eq!(buckets.past_shows_count + buckets.upcoming_shows_count, 4);

        let upcoming: Vec<i64> = buckets.upcoming_shows.iter().map(|s| s.counterpart_id).collect();
        assert_eq!(upcoming, vec![2, 3]);
        let past: Vec<i64> = buckets.past_shows.iter().map(|s| s.counterpart_id).collect();
        assert_eq!(past, vec![1, 4]);
    }

    #[test]
    fn test_search_results_count_matches_data() {
        let results = SearchResults::new(vec![EntitySummary {
            id: 1,
            name: "The Musical Hop".to_string(),
            num_upcoming_shows: 0,
        }]);
        assert_eq!(results.count, 1);
        assert_eq!(SearchResults::empty().count, 0);
    }
}
