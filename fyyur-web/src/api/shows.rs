//! Show routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Form, Router,
};
use fyyur_common::db::Show;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::{artists, shows, venues, NamedRef};
use crate::error::{AppError, AppResult};
use crate::flash::{redirect_with, Flash, IncomingFlash};
use crate::forms::{FieldErrors, FormData, ShowForm, ShowInput};
use crate::ui::{self, Page};
use crate::AppState;

/// Result of trying to book a show
#[derive(Debug)]
enum ShowOutcome {
    Created(Show),
    /// Artist and/or venue do not exist; nothing was written
    MissingParents(FieldErrors),
}

/// GET /shows
pub async fn list_shows(State(state): State<AppState>, incoming: IncomingFlash) -> AppResult<Page> {
    let mut tx = state.db.begin().await?;
    let listing = shows::list_all(&mut *tx).await?;
    tx.commit().await?;

    Ok(ui::shows_page(&listing).with_incoming(incoming))
}

/// GET /shows/create
pub async fn create_show_form(State(state): State<AppState>) -> AppResult<Page> {
    let (artists, venues) = load_choices(&state.db).await?;
    let form = ShowForm::starting_at(state.clock.now());
    Ok(ui::show_form_page(&form, &FieldErrors::default(), &artists, &venues))
}

/// POST /shows/create
pub async fn create_show_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = ShowForm::from_data(&FormData::new(pairs));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return redisplay(&state.db, &form, &errors).await,
    };

    match insert_show(&state.db, &input).await {
        Ok(ShowOutcome::Created(show)) => {
            info!(
                show_id = show.id,
                artist_id = show.artist_id,
                venue_id = show.venue_id,
                start_time = %show.start_time,
                "Show listed"
            );
            Ok(redirect_with("/shows", Flash::success("Show was successfully listed!")))
        }
        Ok(ShowOutcome::MissingParents(errors)) => redisplay(&state.db, &form, &errors).await,
        Err(e) => Err(AppError::persistence(
            "An error occurred. Show could not be listed.",
            e,
        )),
    }
}

/// Check both parents and insert inside one transaction
async fn insert_show(db: &SqlitePool, input: &ShowInput) -> fyyur_common::Result<ShowOutcome> {
    let mut tx = db.begin().await?;

    let mut errors = FieldErrors::default();
    if !artists::exists(&mut *tx, input.artist_id).await? {
        errors.add("artist_id", format!("No artist with id {}.", input.artist_id));
    }
    if !venues::exists(&mut *tx, input.venue_id).await? {
        errors.add("venue_id", format!("No venue with id {}.", input.venue_id));
    }
    if !errors.is_empty() {
        return Ok(ShowOutcome::MissingParents(errors));
    }

    let show = shows::insert(&mut *tx, input).await?;
    tx.commit().await?;
    Ok(ShowOutcome::Created(show))
}

async fn load_choices(db: &SqlitePool) -> fyyur_common::Result<(Vec<NamedRef>, Vec<NamedRef>)> {
    let mut tx = db.begin().await?;
    let artists = artists::list_names(&mut *tx).await?;
    let venues = venues::list_names(&mut *tx).await?;
    tx.commit().await?;
    Ok((artists, venues))
}

async fn redisplay(db: &SqlitePool, form: &ShowForm, errors: &FieldErrors) -> AppResult<Response> {
    let fields: Vec<&str> = errors.fields().collect();
    warn!(fields = ?fields, "Show form rejected");

    let (artists, venues) = load_choices(db).await?;
    Ok(ui::show_form_page(form, errors, &artists, &venues)
        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        .into_response())
}

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show_submission))
}
