//! Venue and artist detail pages

use super::{esc, format_datetime, genre_tags, Page};
use crate::aggregate::{ArtistDetail, ShowBuckets, VenueDetail};

pub fn venue_detail_page(detail: &VenueDetail) -> Page {
    let venue = &detail.venue;
    let seeking = if venue.seeking_talent {
        format!(
            "<p><strong>Seeking talent</strong> {}</p>",
            esc(venue.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        r#"<p class="muted">Not currently seeking talent</p>"#.to_string()
    };

    let body = format!(
        r#"<h1>{name}</h1>
<p class="muted">ID: {id}</p>
<div class="genres">{genres}</div>
<p>{address}<br>{city}, {state}</p>
{contact}
{seeking}
{image}
<p><a href="/venues/{id}/edit">Edit</a> {delete}</p>
{shows}"#,
        id = venue.id,
        name = esc(&venue.name),
        genres = genre_tags(&venue.genres),
        address = esc(&venue.address),
        city = esc(&venue.city),
        state = esc(&venue.state),
        contact = contact_block(
            venue.phone.as_deref(),
            venue.website_link.as_deref(),
            venue.facebook_link.as_deref()
        ),
        image = image_block(venue.image_link.as_deref(), &venue.name),
        delete = delete_button(&format!("/venues/{}", venue.id)),
        shows = show_sections(&detail.shows, "artists"),
    );

    Page::new(venue.name.clone(), body)
}

pub fn artist_detail_page(detail: &ArtistDetail) -> Page {
    let artist = &detail.artist;
    let seeking = if artist.seeking_venue {
        format!(
            "<p><strong>Seeking performance venues</strong> {}</p>",
            esc(artist.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        r#"<p class="muted">Not currently seeking performance venues</p>"#.to_string()
    };

    let body = format!(
        r#"<h1>{name}</h1>
<p class="muted">ID: {id}</p>
<div class="genres">{genres}</div>
<p>{city}, {state}</p>
{contact}
{seeking}
{image}
<p><a href="/artists/{id}/edit">Edit</a> {delete}</p>
{shows}"#,
        id = artist.id,
        name = esc(&artist.name),
        genres = genre_tags(&artist.genres),
        city = esc(&artist.city),
        state = esc(&artist.state),
        contact = contact_block(
            artist.phone.as_deref(),
            artist.website_link.as_deref(),
            artist.facebook_link.as_deref()
        ),
        image = image_block(artist.image_link.as_deref(), &artist.name),
        delete = delete_button(&format!("/artists/{}", artist.id)),
        shows = show_sections(&detail.shows, "venues"),
    );

    Page::new(artist.name.clone(), body)
}

fn contact_block(phone: Option<&str>, website: Option<&str>, facebook: Option<&str>) -> String {
    let mut lines = Vec::new();
    if let Some(phone) = phone {
        lines.push(format!("Phone: {}", esc(phone)));
    }
    if let Some(website) = website {
        lines.push(format!(r#"<a href="{}">{}</a>"#, esc(website), esc(website)));
    }
    if let Some(facebook) = facebook {
        lines.push(format!(r#"<a href="{}">{}</a>"#, esc(facebook), esc(facebook)));
    }

    if lines.is_empty() {
        String::new()
    } else {
        format!("<p>{}</p>", lines.join("<br>"))
    }
}

fn image_block(link: Option<&str>, alt: &str) -> String {
    link.map(|link| format!(r#"<img src="{}" alt="{}" style="max-width: 100%;">"#, esc(link), esc(alt)))
        .unwrap_or_default()
}

/// Button issuing `DELETE path`, then following the returned `homeUrl`
fn delete_button(path: &str) -> String {
    format!(
        r#"<button type="button" onclick="fetch('{path}', {{ method: 'DELETE' }}).then(r => r.json()).then(d => {{ window.location = d.homeUrl; }})">Delete</button>"#
    )
}

/// Past and upcoming sections; `counterpart` is the path segment of the linked side
fn show_sections(shows: &ShowBuckets, counterpart: &str) -> String {
    let cards = |entries: &[crate::db::ShowEntry]| -> String {
        entries
            .iter()
            .map(|show| {
                format!(
                    r#"<div class="show-card">
    {image}
    <h5><a href="/{counterpart}/{id}">{name}</a></h5>
    <p class="muted">{start}</p>
</div>
"#,
                    image = image_block(show.counterpart_image_link.as_deref(), &show.counterpart_name),
                    id = show.counterpart_id,
                    name = esc(&show.counterpart_name),
                    start = format_datetime(show.start_time),
                )
            })
            .collect()
    };

    format!(
        "<section>\n<h2>{} Upcoming Show(s)</h2>\n{}</section>\n<section>\n<h2>{} Past Show(s)</h2>\n{}</section>",
        shows.upcoming_shows_count,
        cards(&shows.upcoming_shows),
        shows.past_shows_count,
        cards(&shows.past_shows),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::partition_shows;
    use crate::db::ShowEntry;
    use chrono::{Duration, TimeZone, Utc};
    use fyyur_common::db::Venue;

    fn venue() -> Venue {
        Venue {
            id: 1,
            name: "The Musical Hop".to_string(),
            address: "1015 Folsom Street".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: Some("123-123-1234".to_string()),
            website_link: None,
            facebook_link: None,
            image_link: None,
            genres: vec!["Jazz".to_string(), "R&B".to_string()],
            seeking_talent: true,
            seeking_description: Some("We are on the lookout".to_string()),
        }
    }

    #[test]
    fn test_venue_detail_shows_counts_and_links() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let entries = vec![
            ShowEntry {
                counterpart_id: 4,
                counterpart_name: "Guns N Petals".to_string(),
                counterpart_image_link: None,
                start_time: now - Duration::days(10),
            },
            ShowEntry {
                counterpart_id: 5,
                counterpart_name: "Matt Quevedo".to_string(),
                counterpart_image_link: None,
                start_time: now + Duration::days(10),
            },
        ];
        let detail = VenueDetail {
            venue: venue(),
            shows: partition_shows(entries, now),
        };

        let html = venue_detail_page(&detail).render();
        assert!(html.contains("1 Upcoming Show(s)"));
        assert!(html.contains("1 Past Show(s)"));
        assert!(html.contains(r#"href="/artists/5""#));
        assert!(html.contains("R&amp;B"));
        assert!(html.contains("Seeking talent"));
        assert!(html.contains("fetch('/venues/1'"));
    }
}
