//! Venue routes

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::{error, info};

use super::{DeleteResponse, EntityId, SearchForm};
use crate::aggregate::{self, Area, SearchResults};
use crate::db::venues;
use crate::error::{AppError, AppResult};
use crate::flash::{self, redirect_with, Flash, IncomingFlash};
use crate::forms::{FieldErrors, FormData, VenueForm, VenueInput};
use crate::ui::{self, FormMode, Page, SearchKind};
use crate::AppState;

/// GET /venues
///
/// Venues grouped by (city, state). A failed query still renders the page,
/// empty, with an error message.
pub async fn list_venues(State(state): State<AppState>, incoming: IncomingFlash) -> Page {
    match load_directory(&state.db, state.clock.now()).await {
        Ok(areas) => ui::venues_page(&areas).with_incoming(incoming),
        Err(e) => {
            error!(error = %e, "Failed to load venue directory");
            ui::venues_page(&[])
                .with_incoming(incoming)
                .with_flash(Flash::error("An error occurred. Venues could not be loaded."))
        }
    }
}

async fn load_directory(db: &SqlitePool, now: DateTime<Utc>) -> fyyur_common::Result<Vec<Area>> {
    let mut tx = db.begin().await?;
    let areas = aggregate::venue_directory(&mut *tx, now).await?;
    tx.commit().await?;
    Ok(areas)
}

/// POST /venues/search
pub async fn search_venues(State(state): State<AppState>, Form(search): Form<SearchForm>) -> Page {
    let term = search.search_term.trim().to_string();
    match run_search(&state.db, &term, state.clock.now()).await {
        Ok(results) => {
            info!(term = %term, count = results.count, "Venue search");
            ui::search_page(SearchKind::Venues, &term, &results)
        }
        Err(e) => {
            error!(error = %e, term = %term, "Venue search failed");
            ui::search_page(SearchKind::Venues, &term, &SearchResults::empty())
                .with_flash(Flash::error("An error occurred. Search could not be completed."))
        }
    }
}

async fn run_search(
    db: &SqlitePool,
    term: &str,
    now: DateTime<Utc>,
) -> fyyur_common::Result<SearchResults> {
    let mut tx = db.begin().await?;
    let results = aggregate::search_venues(&mut *tx, term, now).await?;
    tx.commit().await?;
    Ok(results)
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    incoming: IncomingFlash,
) -> AppResult<Page> {
    let mut tx = state.db.begin().await?;
    let detail = aggregate::venue_detail(&mut *tx, id, state.clock.now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {id}")))?;
    tx.commit().await?;

    Ok(ui::venue_detail_page(&detail).with_incoming(incoming))
}

/// GET /venues/create
pub async fn create_venue_form() -> Page {
    ui::venue_form_page(FormMode::Create, &VenueForm::default(), &FieldErrors::default())
}

/// POST /venues/create
pub async fn create_venue_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = VenueForm::from_data(&FormData::new(pairs));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(redisplay(FormMode::Create, &form, &errors)),
    };

    match insert_venue(&state.db, &input).await {
        Ok(id) => {
            info!(venue_id = id, name = %input.name, "Venue listed");
            Ok(redirect_with(
                &format!("/venues/{id}"),
                Flash::success(format!("Venue {} was successfully listed!", input.name)),
            ))
        }
        Err(e) => Err(AppError::persistence(
            format!("An error occurred. Venue {} could not be listed.", input.name),
            e,
        )),
    }
}

async fn insert_venue(db: &SqlitePool, input: &VenueInput) -> fyyur_common::Result<i64> {
    let mut tx = db.begin().await?;
    let id = venues::insert(&mut *tx, input).await?;
    tx.commit().await?;
    Ok(id)
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Page> {
    let mut tx = state.db.begin().await?;
    let venue = venues::find(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("venue {id}")))?;
    tx.commit().await?;

    Ok(ui::venue_form_page(
        FormMode::Edit(id),
        &VenueForm::from_venue(&venue),
        &FieldErrors::default(),
    ))
}

/// POST /venues/:id/edit
pub async fn edit_venue_submission(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = VenueForm::from_data(&FormData::new(pairs));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            if !venue_exists(&state.db, id).await? {
                return Err(AppError::NotFound(format!("venue {id}")));
            }
            return Ok(redisplay(FormMode::Edit(id), &form, &errors));
        }
    };

    match update_venue(&state.db, id, &input).await {
        Ok(true) => {
            info!(venue_id = id, name = %input.name, "Venue updated");
            Ok(redirect_with(
                &format!("/venues/{id}"),
                Flash::success(format!("Venue {} was successfully updated!", input.name)),
            ))
        }
        Ok(false) => Err(AppError::NotFound(format!("venue {id}"))),
        Err(e) => Err(AppError::persistence(
            format!("An error occurred. Venue {} could not be updated.", input.name),
            e,
        )),
    }
}

async fn venue_exists(db: &SqlitePool, id: i64) -> fyyur_common::Result<bool> {
    let mut tx = db.begin().await?;
    let exists = venues::exists(&mut *tx, id).await?;
    tx.commit().await?;
    Ok(exists)
}

async fn update_venue(db: &SqlitePool, id: i64, input: &VenueInput) -> fyyur_common::Result<bool> {
    let mut tx = db.begin().await?;
    let updated = venues::update(&mut *tx, id, input).await?;
    if updated {
        tx.commit().await?;
    }
    Ok(updated)
}

/// DELETE /venues/:id
///
/// Deleting an id that does not exist succeeds with `deleted: false`.
pub async fn delete_venue(State(state): State<AppState>, EntityId(id): EntityId) -> Response {
    match delete_venue_by_id(&state.db, id).await {
        Ok(deleted) => {
            let message = if deleted {
                info!(venue_id = id, "Venue deleted");
                Flash::success(format!("Venue {id} was successfully deleted."))
            } else {
                info!(venue_id = id, "Delete requested for unknown venue");
                Flash::info(format!("Venue {id} does not exist; nothing was deleted."))
            };
            flash::attach(Json(DeleteResponse::completed(deleted)).into_response(), &message)
        }
        Err(e) => {
            error!(venue_id = id, error = %e, "Venue delete failed");
            let message = format!("An error occurred. Venue {id} could not be deleted.");
            let response = (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeleteResponse::failed(message.clone())),
            )
                .into_response();
            flash::attach(response, &Flash::error(message))
        }
    }
}

async fn delete_venue_by_id(db: &SqlitePool, id: i64) -> fyyur_common::Result<bool> {
    let mut tx = db.begin().await?;
    let deleted = venues::delete(&mut *tx, id).await?;
    tx.commit().await?;
    Ok(deleted)
}

fn redisplay(mode: FormMode, form: &VenueForm, errors: &FieldErrors) -> Response {
    let fields: Vec<&str> = errors.fields().collect();
    info!(fields = ?fields, "Venue form rejected");
    ui::venue_form_page(mode, form, errors)
        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        .into_response()
}

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue_submission))
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route("/venues/:id/edit", get(edit_venue_form).post(edit_venue_submission))
}
