use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router, extract::Path, extract::State};

use crate::application::reminder_service::ReminderService;
use crate::domain::error::Error;
use crate::domain::reminder::{CreateReminder, Reminder, ReminderId, UpdateReminder};
use crate::http::types::{ApiResponse, JsonOrForm};

#[derive(Clone)]
pub struct AppState<S: ReminderService> {
    pub service: S,
}

pub fn router<S: ReminderService + Clone>(state: AppState<S>) -> Router {
    Router::new()
        .route("/reminders", get(list_reminders::<S>).post(create_reminder::<S>))
        .route(
            "/reminders/:id",
            get(get_reminder::<S>)
                .put(update_reminder::<S>)
                .delete(delete_reminder::<S>),
        )
        .route("/reminders/:id/complete", patch(complete_reminder::<S>))
        .with_state(state)
}

async fn list_reminders<S: ReminderService>(
    State(state): State<AppState<S>>,
) -> Json<ApiResponse<Vec<Reminder>>> {
    tracing::info!("fetching all reminders");
    Json(ApiResponse::ok(state.service.list().await))
}

async fn get_reminder<S: ReminderService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Reminder>>, Error> {
    tracing::info!(%id, "fetching single reminder");
    let id = parse_id(&id)?;
    Ok(Json(ApiResponse::ok(state.service.get(&id).await?)))
}

async fn create_reminder<S: ReminderService>(
    State(state): State<AppState<S>>,
    JsonOrForm(input): JsonOrForm<CreateReminder>,
) -> Result<(StatusCode, Json<ApiResponse<Reminder>>), Error> {
    tracing::info!(title = input.title.as_deref().unwrap_or(""), "creating reminder");
    let reminder = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(reminder))))
}

async fn update_reminder<S: ReminderService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    JsonOrForm(input): JsonOrForm<UpdateReminder>,
) -> Result<Json<ApiResponse<Reminder>>, Error> {
    tracing::info!(%id, "updating reminder");
    let id = parse_id(&id)?;
    Ok(Json(ApiResponse::ok(state.service.update(&id, input).await?)))
}

async fn delete_reminder<S: ReminderService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Reminder>>, Error> {
    tracing::info!(%id, "deleting reminder");
    let id = parse_id(&id)?;
    Ok(Json(ApiResponse::ok(state.service.delete(&id).await?)))
}

async fn complete_reminder<S: ReminderService>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Reminder>>, Error> {
    tracing::info!(%id, "marking reminder as completed");
    let id = parse_id(&id)?;
    Ok(Json(ApiResponse::ok(state.service.complete(&id).await?)))
}

// A path id that is not a UUID cannot match any stored reminder.
fn parse_id(s: &str) -> Result<ReminderId, Error> {
    ReminderId::parse(s).ok_or(Error::NotFound)
}
