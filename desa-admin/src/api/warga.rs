//! Resident endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use desa_common::models::{Warga, WargaInput};

use super::ApiResult;
use crate::AppState;

/// GET /api/warga
pub async fn list_warga(State(state): State<AppState>) -> ApiResult<Json<Vec<Warga>>> {
    Ok(Json(state.service.warga.list().await?))
}

/// POST /api/warga
pub async fn create_warga(
    State(state): State<AppState>,
    Json(input): Json<WargaInput>,
) -> ApiResult<(StatusCode, Json<Warga>)> {
    let warga = state.service.warga.add(input).await?;
    Ok((StatusCode::CREATED, Json(warga)))
}

/// PUT /api/warga/:id
///
/// Full replacement; the id in the path wins over the body
pub async fn update_warga(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(warga): Json<Warga>,
) -> ApiResult<Json<Warga>> {
    Ok(Json(state.service.warga.update(&id, warga).await?))
}

/// DELETE /api/warga/:id
pub async fn delete_warga(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Warga>> {
    Ok(Json(state.service.warga.delete(&id).await?))
}

pub fn warga_routes() -> Router<AppState> {
    Router::new()
        .route("/api/warga", get(list_warga).post(create_warga))
        .route("/api/warga/:id", put(update_warga).delete(delete_warga))
}
