use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use crate::api::AppState;
use crate::db::models::blog::{BlogPost, CreateBlogRequest};
use crate::error::AppResult;

pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateBlogRequest>,
) -> AppResult<&'static str> {
    state.store.insert_blog(body).await?;
    Ok("Blog Saved")
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<BlogPost>>> {
    Ok(Json(state.store.list_blogs().await?))
}

/// Reports success whether or not the id matched a post.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> AppResult<&'static str> {
    state.store.delete_blog(&id).await?;
    Ok("Deleted")
}
