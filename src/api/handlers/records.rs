use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use crate::api::AppState;
use crate::db::models::record::{CreateRecordRequest, Record, UpdateRecordRequest};
use crate::error::{AppError, AppResult};

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateRecordRequest>,
) -> AppResult<&'static str> {
    // Pre-check for a friendly message; the unique index catches the race.
    if state.store.find_record_by_name(&body.name).await?.is_some() {
        return Err(AppError::Conflict("Name already exists".to_string()));
    }

    state.store.insert_record(body).await?;
    Ok("Data Saved")
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Record>>> {
    Ok(Json(state.store.list_records().await?))
}

/// Reports success whether or not the id matched a record.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<&'static str> {
    state.store.delete_record(&id).await?;
    Ok("User Deleted")
}

/// Reports success whether or not the id matched a record.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateRecordRequest>,
) -> AppResult<&'static str> {
    state.store.update_record(&id, body).await?;
    Ok("User Updated")
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<Record>>> {
    Ok(Json(state.store.search_records_by_name(&name).await?))
}
