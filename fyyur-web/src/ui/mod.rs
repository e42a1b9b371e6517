//! Server-rendered HTML pages
//!
//! Pages are built with `format!` into a shared layout. Every interpolated
//! user value goes through [`esc`], which also covers quoted attribute values.

mod detail;
mod errors;
mod forms;
mod listings;

pub use detail::{artist_detail_page, venue_detail_page};
pub use errors::{not_found_page, server_error_page};
pub use forms::{artist_form_page, show_form_page, venue_form_page, FormMode};
pub use listings::{artists_page, home_page, search_page, shows_page, venues_page, SearchKind};

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Utc};

use crate::flash::{clear_cookie, Flash, IncomingFlash};

/// Display format for show start times, e.g. `Sun 04, 01, 2035 8:00PM`
pub const DISPLAY_DATETIME_FORMAT: &str = "%a %m, %d, %Y %-I:%M%p";

/// A rendered page plus the response metadata that goes with it
#[derive(Debug, Clone)]
pub struct Page {
    pub status: StatusCode,
    pub title: String,
    pub body: String,
    pub flashes: Vec<Flash>,
    clear_flash: bool,
}

impl Page {
    pub fn new(title: impl Into<String>, body: String) -> Self {
        Self {
            status: StatusCode::OK,
            title: title.into(),
            body,
            flashes: Vec::new(),
            clear_flash: false,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Show the flash left by the previous response and expire its cookie
    pub fn with_incoming(mut self, incoming: IncomingFlash) -> Self {
        if let Some(flash) = incoming.0 {
            self.flashes.insert(0, flash);
            self.clear_flash = true;
        }
        self
    }

    /// Show a message generated by this request
    pub fn with_flash(mut self, flash: Flash) -> Self {
        self.flashes.push(flash);
        self
    }

    pub fn render(&self) -> String {
        layout(&self.title, &self.flashes, &self.body)
    }
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        let html = Html(self.render());
        if self.clear_flash {
            (self.status, [(header::SET_COOKIE, clear_cookie())], html).into_response()
        } else {
            (self.status, html).into_response()
        }
    }
}

/// Escape text content or a double-quoted attribute value
pub fn esc(value: &str) -> String {
    htmlescape::encode_minimal(value)
}

pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format(DISPLAY_DATETIME_FORMAT).to_string()
}

fn render_flashes(flashes: &[Flash]) -> String {
    flashes
        .iter()
        .map(|flash| {
            format!(
                r#"<div class="flash flash-{}" role="alert">{}</div>"#,
                flash.category,
                esc(&flash.message)
            )
        })
        .collect()
}

fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = env!("GIT_HASH");
    let build_timestamp = env!("BUILD_TIMESTAMP");
    let build_profile = env!("BUILD_PROFILE");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | Fyyur</title>
    <style>
        * {{ box-sizing: border-box; }}
        body {{
            margin: 0;
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #f7f7f7;
            color: #222;
            line-height: 1.5;
        }}
        header {{
            background-color: #1f1f2e;
            padding: 12px 24px;
            display: flex;
            gap: 24px;
            align-items: center;
        }}
        header a {{ color: #eee; text-decoration: none; }}
        header .brand {{ font-weight: bold; font-size: 20px; margin-right: auto; }}
        main {{ max-width: 960px; margin: 24px auto; padding: 0 16px; }}
        .flash {{ padding: 10px 14px; margin-bottom: 16px; border-radius: 4px; }}
        .flash-success {{ background: #dff0d8; }}
        .flash-info {{ background: #d9edf7; }}
        .flash-error {{ background: #f2dede; }}
        .area {{ margin-bottom: 20px; }}
        .items {{ list-style: none; padding: 0; }}
        .items li {{ padding: 6px 0; border-bottom: 1px solid #ddd; }}
        .muted {{ color: #777; font-size: 0.9em; }}
        .genres span {{ display: inline-block; background: #e4e4ee; padding: 2px 8px; margin: 2px; border-radius: 10px; }}
        .field {{ margin-bottom: 12px; }}
        .field label {{ display: block; font-weight: 600; }}
        .field input, .field select {{ width: 100%; padding: 6px; }}
        .field.has-error input, .field.has-error select {{ border: 1px solid #c0392b; }}
        .field .error {{ color: #c0392b; font-size: 0.9em; }}
        .show-card {{ display: inline-block; width: 200px; margin: 0 12px 12px 0; vertical-align: top; }}
        .show-card img {{ width: 100%; }}
        footer {{ text-align: center; color: #888; font-size: 12px; font-family: 'Courier New', monospace; padding: 24px; }}
    </style>
</head>
<body>
    <header>
        <a class="brand" href="/">Fyyur</a>
        <a href="/venues">Venues</a>
        <a href="/artists">Artists</a>
        <a href="/shows">Shows</a>
    </header>
    <main>
        {flashes}
        {body}
    </main>
    <footer>fyyur-web v{version} ({git_hash}) built {build_timestamp} [{build_profile}]</footer>
</body>
</html>"#,
        title = esc(title),
        flashes = render_flashes(flashes),
    )
}

/// Search box posting `search_term` to `action`
fn search_form(action: &str, placeholder: &str, term: &str) -> String {
    format!(
        r#"<form class="search" method="post" action="{action}">
    <input type="search" name="search_term" placeholder="{placeholder}" value="{term}">
    <button type="submit">Search</button>
</form>"#,
        term = esc(term),
    )
}

fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|genre| format!("<span>{}</span>", esc(genre)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_escaping() {
        assert_eq!(esc("<b>Rock & Roll</b>"), "&lt;b&gt;Rock &amp; Roll&lt;/b&gt;");
        assert_eq!(esc(r#"" onmouseover="x"#), "&quot; onmouseover=&quot;x");
    }

    #[test]
    fn test_format_datetime() {
        let start = Utc.with_ymd_and_hms(2035, 4, 1, 20, 0, 0).unwrap();
        assert_eq!(format_datetime(start), "Sun 04, 01, 2035 8:00PM");
    }

    #[test]
    fn test_incoming_flash_is_rendered_and_cleared() {
        let page = Page::new("Home", "<p>hi</p>".to_string())
            .with_incoming(IncomingFlash(Some(Flash::success("Saved <ok>"))));
        assert!(page.render().contains("Saved &lt;ok&gt;"));

        let response = page.into_response();
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_page_without_flash_sets_no_cookie() {
        let response = Page::new("Home", String::new())
            .with_status(StatusCode::NOT_FOUND)
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(!response.headers().contains_key(header::SET_COOKIE));
    }
}
