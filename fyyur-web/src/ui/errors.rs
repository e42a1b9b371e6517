use axum::http::StatusCode;

use super::Page;
use crate::flash::Flash;

pub fn not_found_page() -> Page {
    let body = r#"<h1>404</h1>
<p>Not found. The page you are looking for does not exist.</p>
<p><a href="/">Back to home</a></p>"#
        .to_string();

    Page::new("Not Found", body).with_status(StatusCode::NOT_FOUND)
}

/// 500 page, carrying `message` as an error flash when given
pub fn server_error_page(message: Option<&str>) -> Page {
    let body = r#"<h1>500</h1>
<p>Something went wrong on our side. Please try again.</p>
<p><a href="/">Back to home</a></p>"#
        .to_string();

    let page = Page::new("Server Error", body).with_status(StatusCode::INTERNAL_SERVER_ERROR);
    match message {
        Some(message) => page.with_flash(Flash::error(message)),
        None => page,
    }
}
