//! Change-request endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use desa_common::models::{Permohonan, PermohonanInput, PermohonanStatus};
use serde::Deserialize;

use super::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: PermohonanStatus,
}

/// GET /api/permohonan
pub async fn list_permohonan(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<Permohonan>>> {
    Ok(Json(state.service.permohonan.list().await?))
}

/// POST /api/permohonan
pub async fn submit_permohonan(
    State(state): State<AppState>,
    Json(input): Json<PermohonanInput>,
) -> ApiResult<(StatusCode, Json<Permohonan>)> {
    let permohonan = state.service.permohonan.submit(input).await?;
    Ok((StatusCode::CREATED, Json(permohonan)))
}

/// PUT /api/permohonan/:id/status
///
/// Body `{"status": "Disetujui" | "Ditolak"}`; 409 if already decided
pub async fn set_permohonan_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<StatusRequest>,
) -> ApiResult<Json<Permohonan>> {
    Ok(Json(
        state
            .service
            .permohonan
            .set_status(&id, request.status)
            .await?,
    ))
}

pub fn permohonan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/permohonan", get(list_permohonan).post(submit_permohonan))
        .route("/api/permohonan/:id/status", put(set_permohonan_status))
}
