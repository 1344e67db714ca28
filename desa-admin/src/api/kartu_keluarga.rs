//! Family-card endpoints, including the QR import

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use desa_common::models::{KartuKeluarga, KkImport, KkImportOutcome, Warga};

use super::ApiResult;
use crate::AppState;

/// GET /api/kartu-keluarga
pub async fn list_kartu_keluarga(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<KartuKeluarga>>> {
    Ok(Json(state.service.kartu_keluarga.list().await?))
}

/// GET /api/kartu-keluarga/:id/anggota
pub async fn list_anggota(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Warga>>> {
    Ok(Json(state.service.kartu_keluarga.anggota(&id).await?))
}

/// POST /api/kartu-keluarga/import
///
/// Body is the decoded QR payload. 409 when the card number is already
/// registered, 400 when the head is not among the members.
pub async fn import_kartu_keluarga(
    State(state): State<AppState>,
    Json(payload): Json<KkImport>,
) -> ApiResult<(StatusCode, Json<KkImportOutcome>)> {
    let outcome = state.service.kartu_keluarga.import(payload).await?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

/// DELETE /api/kartu-keluarga/:id
pub async fn delete_kartu_keluarga(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<KartuKeluarga>> {
    Ok(Json(state.service.kartu_keluarga.delete(&id).await?))
}

pub fn kartu_keluarga_routes() -> Router<AppState> {
    Router::new()
        .route("/api/kartu-keluarga", get(list_kartu_keluarga))
        .route("/api/kartu-keluarga/import", post(import_kartu_keluarga))
        .route("/api/kartu-keluarga/:id", delete(delete_kartu_keluarga))
        .route("/api/kartu-keluarga/:id/anggota", get(list_anggota))
}
