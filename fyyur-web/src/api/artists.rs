//! Artist routes

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
use crate::aggregate::{self, SearchResults};
use crate::db::{artists, NamedRef};
use crate::error::{AppError, AppResult};
use crate::flash::{self, redirect_with, Flash, IncomingFlash};
use crate::forms::{ArtistForm, ArtistInput, FieldErrors, FormData};
use crate::ui::{self, FormMode, Page, SearchKind};
use crate::AppState;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>, incoming: IncomingFlash) -> Page {
    match load_artists(&state.db).await {
        Ok(artists) => ui::artists_page(&artists).with_incoming(incoming),
        Err(e) => {
            error!(error = %e, "Failed to load artists");
            ui::artists_page(&[])
                .with_incoming(incoming)
                .with_flash(Flash::error("An error occurred. Artists could not be loaded."))
        }
    }
}

async fn load_artists(db: &SqlitePool) -> fyyur_common::Result<Vec<NamedRef>> {
    let mut tx = db.begin().await?;
    let artists = artists::list_names(&mut *tx).await?;
    tx.commit().await?;
    Ok(artists)
}

/// POST /artists/search
pub async fn search_artists(State(state): State<AppState>, Form(search): Form<SearchForm>) -> Page {
    let term = search.search_term.trim().to_string();
    match run_search(&state.db, &term, state.clock.now()).await {
        Ok(results) => {
            info!(term = %term, count = results.count, "Artist search");
            ui::search_page(SearchKind::Artists, &term, &results)
        }
        Err(e) => {
            error!(error = %e, term = %term, "Artist search failed");
            ui::search_page(SearchKind::Artists, &term, &SearchResults::empty())
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
    let results = aggregate::search_artists(&mut *tx, term, now).await?;
    tx.commit().await?;
    Ok(results)
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    incoming: IncomingFlash,
) -> AppResult<Page> {
    let mut tx = state.db.begin().await?;
    let detail = aggregate::artist_detail(&mut *tx, id, state.clock.now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {id}")))?;
    tx.commit().await?;

    Ok(ui::artist_detail_page(&detail).with_incoming(incoming))
}

/// GET /artists/create
pub async fn create_artist_form() -> Page {
    ui::artist_form_page(FormMode::Create, &ArtistForm::default(), &FieldErrors::default())
}

/// POST /artists/create
pub async fn create_artist_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = ArtistForm::from_data(&FormData::new(pairs));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Ok(redisplay(FormMode::Create, &form, &errors)),
    };

    match insert_artist(&state.db, &input).await {
        Ok(id) => {
            info!(artist_id = id, name = %input.name, "Artist listed");
            Ok(redirect_with(
                &format!("/artists/{id}"),
                Flash::success(format!("Artist {} was successfully listed!", input.name)),
            ))
        }
        Err(e) => Err(AppError::persistence(
            format!("An error occurred. Artist {} could not be listed.", input.name),
            e,
        )),
    }
}

async fn insert_artist(db: &SqlitePool, input: &ArtistInput) -> fyyur_common::Result<i64> {
    let mut tx = db.begin().await?;
    let id = artists::insert(&mut *tx, input).await?;
    tx.commit().await?;
    Ok(id)
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> AppResult<Page> {
    let mut tx = state.db.begin().await?;
    let artist = artists::find(&mut *tx, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("artist {id}")))?;
    tx.commit().await?;

    Ok(ui::artist_form_page(
        FormMode::Edit(id),
        &ArtistForm::from_artist(&artist),
        &FieldErrors::default(),
    ))
}

/// POST /artists/:id/edit
pub async fn edit_artist_submission(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Form(pairs): Form<Vec<(String, String)>>,
) -> AppResult<Response> {
    let form = ArtistForm::from_data(&FormData::new(pairs));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            if !artist_exists(&state.db, id).await? {
                return Err(AppError::NotFound(format!("artist {id}")));
            }
            return Ok(redisplay(FormMode::Edit(id), &form, &errors));
        }
    };

    match update_artist(&state.db, id, &input).await {
        Ok(true) => {
            info!(artist_id = id, name = %input.name, "Artist updated");
            Ok(redirect_with(
                &format!("/artists/{id}"),
                Flash::success(format!("Artist {} was successfully updated!", input.name)),
            ))
        }
        Ok(false) => Err(AppError::NotFound(format!("artist {id}"))),
        Err(e) => Err(AppError::persistence(
            format!("An error occurred. Artist {} could not be updated.", input.name),
            e,
        )),
    }
}

async fn artist_exists(db: &SqlitePool, id: i64) -> fyyur_common::Result<bool> {
    let mut tx = db.begin().await?;
    let exists = artists::exists(&mut *tx, id).await?;
    tx.commit().await?;
    Ok(exists)
}

async fn update_artist(db: &SqlitePool, id: i64, input: &ArtistInput) -> fyyur_common::Result<bool> {
    let mut tx = db.begin().await?;
    let updated = artists::update(&mut *tx, id, input).await?;
    if updated {
        tx.commit().await?;
    }
    Ok(updated)
}

/// DELETE /artists/:id
pub async fn delete_artist(State(state): State<AppState>, EntityId(id): EntityId) -> Response {
    match delete_artist_by_id(&state.db, id).await {
        Ok(deleted) => {
            let message = if deleted {
                info!(artist_id = id, "Artist deleted");
                Flash::success(format!("Artist {id} was successfully deleted."))
            } else {
                info!(artist_id = id, "Delete requested for unknown artist");
                Flash::info(format!("Artist {id} does not exist; nothing was deleted."))
            };
            flash::attach(Json(DeleteResponse::completed(deleted)).into_response(), &message)
        }
        Err(e) => {
            error!(artist_id = id, error = %e, "Artist delete failed");
            let message = format!("An error occurred. Artist {id} could not be deleted.");
            let response = (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeleteResponse::failed(message.clone())),
            )
                .into_response();
            flash::attach(response, &Flash::error(message))
        }
    }
}

async fn delete_artist_by_id(db: &SqlitePool, id: i64) -> fyyur_common::Result<bool> {
    let mut tx = db.begin().await?;
    let deleted = artists::delete(&mut *tx, id).await?;
    tx.commit().await?;
    Ok(deleted)
}

fn redisplay(mode: FormMode, form: &ArtistForm, errors: &FieldErrors) -> Response {
    let fields: Vec<&str> = errors.fields().collect();
    info!(fields = ?fields, "Artist form rejected");
    ui::artist_form_page(mode, form, errors)
        .with_status(StatusCode::UNPROCESSABLE_ENTITY)
        .into_response()
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist_submission))
        .route("/artists/:id", get(show_artist).delete(delete_artist))
        .route("/artists/:id/edit", get(edit_artist_form).post(edit_artist_submission))
}
