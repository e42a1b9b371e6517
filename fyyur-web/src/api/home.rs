use axum::{routing::get, Router};

use crate::flash::IncomingFlash;
use crate::ui::{self, Page};
use crate::AppState;

/// GET /
pub async fn home(incoming: IncomingFlash) -> Page {
    ui::home_page().with_incoming(incoming)
}

pub fn home_routes() -> Router<AppState> {
    Router::new().route("/", get(home))
}
