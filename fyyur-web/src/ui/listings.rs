//! Home page and list pages

use super::{esc, format_datetime, search_form, Page};
use crate::aggregate::{Area, SearchResults};
use crate::db::shows::ShowListing;
use crate::db::NamedRef;

/// Which entity a search page lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Venues,
    Artists,
}

impl SearchKind {
    fn base_path(self) -> &'static str {
        match self {
            SearchKind::Venues => "/venues",
            SearchKind::Artists => "/artists",
        }
    }

    fn label(self) -> &'static str {
        match self {
            SearchKind::Venues => "venues",
            SearchKind::Artists => "artists",
        }
    }
}

pub fn home_page() -> Page {
    let body = r#"<h1>Fyyur</h1>
<p>Find venues to play and artists to book.</p>
<ul class="items">
    <li><a href="/venues/create">List a new venue</a></li>
    <li><a href="/artists/create">List a new artist</a></li>
    <li><a href="/shows/create">List a new show</a></li>
</ul>"#
        .to_string();

    Page::new("Home", body)
}

pub fn venues_page(areas: &[Area]) -> Page {
    let mut body = String::from("<h1>Venues</h1>\n");
    body.push_str(&search_form("/venues/search", "Find a venue", ""));

    if areas.is_empty() {
        body.push_str(r#"<p class="muted">No venues listed yet.</p>"#);
    }

    for area in areas {
        body.push_str(&format!(
            "<section class=\"area\">\n<h3>{}, {}</h3>\n<ul class=\"items\">\n",
            esc(&area.city),
            esc(&area.state)
        ));
        for venue in &area.venues {
            body.push_str(&format!(
                "<li><a href=\"/venues/{}\">{}</a> <span class=\"muted\">{} upcoming show(s)</span></li>\n",
                venue.id,
                esc(&venue.name),
                venue.num_upcoming_shows
            ));
        }
        body.push_str("</ul>\n</section>\n");
    }

    Page::new("Venues", body)
}

pub fn artists_page(artists: &[NamedRef]) -> Page {
    let mut body = String::from("<h1>Artists</h1>\n");
    body.push_str(&search_form("/artists/search", "Find an artist", ""));

    if artists.is_empty() {
        body.push_str(r#"<p class="muted">No artists listed yet.</p>"#);
    } else {
        body.push_str("<ul class=\"items\">\n");
        for artist in artists {
            body.push_str(&format!(
                "<li><a href=\"/artists/{}\">{}</a></li>\n",
                artist.id,
                esc(&artist.name)
            ));
        }
        body.push_str("</ul>\n");
    }

    Page::new("Artists", body)
}

pub fn search_page(kind: SearchKind, term: &str, results: &SearchResults) -> Page {
    let base = kind.base_path();
    let mut body = search_form(&format!("{base}/search"), "Search again", term);
    body.push_str(&format!(
        "<h3>Number of search results for \"{}\": {}</h3>\n<ul class=\"items\">\n",
        esc(term),
        results.count
    ));
    for entry in &results.data {
        body.push_str(&format!(
            "<li><a href=\"{base}/{}\">{}</a> <span class=\"muted\">{} upcoming show(s)</span></li>\n",
            entry.id,
            esc(&entry.name),
            entry.num_upcoming_shows
        ));
    }
    body.push_str("</ul>\n");

    Page::new(format!("Search {}", kind.label()), body)
}

pub fn shows_page(shows: &[ShowListing]) -> Page {
    let mut body = String::from("<h1>Shows</h1>\n");

    if shows.is_empty() {
        body.push_str(r#"<p class="muted">No shows listed yet.</p>"#);
    }

    for show in shows {
        let image = show
            .artist_image_link
            .as_deref()
            .map(|link| format!(r#"<img src="{}" alt="{}">"#, esc(link), esc(&show.artist_name)))
            .unwrap_or_default();
        body.push_str(&format!(
            r#"<div class="show-card">
    {image}
    <h5><a href="/artists/{}">{}</a></h5>
    <p>playing at <a href="/venues/{}">{}</a></p>
    <p class="muted">{}</p>
</div>
"#,
            show.artist_id,
            esc(&show.artist_name),
            show.venue_id,
            esc(&show.venue_name),
            format_datetime(show.start_time)
        ));
    }

    Page::new("Shows", body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::AreaVenue;
    use crate::db::EntitySummary;

    #[test]
    fn test_venues_page_lists_areas() {
        let areas = vec![Area {
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            venues: vec![AreaVenue {
                id: 1,
                name: "The Musical Hop".to_string(),
                num_upcoming_shows: 2,
            }],
        }];
        let html = venues_page(&areas).render();
        assert!(html.contains("San Francisco, CA"));
        assert!(html.contains(r#"<a href="/venues/1">The Musical Hop</a>"#));
        assert!(html.contains("2 upcoming show(s)"));
    }

    #[test]
    fn test_search_page_escapes_term() {
        let results = SearchResults::new(vec![EntitySummary {
            id: 4,
            name: "Guns N Petals".to_string(),
            num_upcoming_shows: 0,
        }]);
        let html = search_page(SearchKind::Artists, "<script>", &results).render();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"href="/artists/4""#));
    }
}
