//! Small-business directory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use desa_common::models::{Umkm, UmkmInput};

use super::ApiResult;
use crate::AppState;

pub async fn list_umkm(State(state): State<AppState>) -> ApiResult<Json<Vec<Umkm>>> {
    Ok(Json(state.service.umkm.list().await?))
}

pub async fn create_umkm(
    State(state): State<AppState>,
    Json(input): Json<UmkmInput>,
) -> ApiResult<(StatusCode, Json<Umkm>)> {
    let umkm = state.service.umkm.add(input).await?;
    Ok((StatusCode::CREATED, Json(umkm)))
}

pub async fn update_umkm(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(umkm): Json<Umkm>,
) -> ApiResult<Json<Umkm>> {
    Ok(Json(state.service.umkm.update(&id, umkm).await?))
}

pub async fn delete_umkm(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Umkm>> {
    Ok(Json(state.service.umkm.delete(&id).await?))
}

pub fn umkm_routes() -> Router<AppState> {
    Router::new()
        .route("/api/umkm", get(list_umkm).post(create_umkm))
        .route("/api/umkm/:id", put(update_umkm).delete(delete_umkm))
}
