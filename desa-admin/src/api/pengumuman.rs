//! Announcement endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use desa_common::models::{Pengumuman, PengumumanInput};

use super::ApiResult;
use crate::AppState;

pub async fn list_pengumuman(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Pengumuman>>> {
    Ok(Json(state.service.pengumuman.list().await?))
}

pub async fn create_pengumuman(
    State(state): State<AppState>,
    Json(input): Json<PengumumanInput>,
) -> ApiResult<(StatusCode, Json<Pengumuman>)> {
    let pengumuman = state.service.pengumuman.add(input).await?;
    Ok((StatusCode::CREATED, Json(pengumuman)))
}

/// Title and body only; the publication date is kept
pub async fn update_pengumuman(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<PengumumanInput>,
) -> ApiResult<Json<Pengumuman>> {
    Ok(Json(state.service.pengumuman.update(&id, input).await?))
}

pub async fn delete_pengumuman(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Pengumuman>> {
    Ok(Json(state.service.pengumuman.delete(&id).await?))
}

pub fn pengumuman_routes() -> Router<AppState> {
    Router::new()
        .route("/api/pengumuman", get(list_pengumuman).post(create_pengumuman))
        .route(
            "/api/pengumuman/:id",
            put(update_pengumuman).delete(delete_pengumuman),
        )
}
