//! Administrative document endpoints

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use desa_common::models::{Adminduk, Dokumen, JenisDokumen};

use super::ApiResult;
use crate::AppState;

/// GET /api/adminduk
///
/// Residents without a document set get an empty one first
pub async fn list_adminduk(State(state): State<AppState>) -> ApiResult<Json<Vec<Adminduk>>> {
    Ok(Json(state.service.adminduk.list().await?))
}

/// PUT /api/adminduk/:warga_id/:jenis
pub async fn upload_dokumen(
    State(state): State<AppState>,
    Path((warga_id, jenis)): Path<(String, String)>,
    Json(dokumen): Json<Dokumen>,
) -> ApiResult<Json<Adminduk>> {
    let jenis: JenisDokumen = jenis.parse()?;
    Ok(Json(
        state
            .service
            .adminduk
            .upload(&warga_id, jenis, dokumen)
            .await?,
    ))
}

/// DELETE /api/adminduk/:warga_id/:jenis
///
/// `null` when the resident has no document set
pub async fn delete_dokumen(
    State(state): State<AppState>,
    Path((warga_id, jenis)): Path<(String, String)>,
) -> ApiResult<Json<Option<Adminduk>>> {
    let jenis: JenisDokumen = jenis.parse()?;
    Ok(Json(state.service.adminduk.remove(&warga_id, jenis).await?))
}

pub fn adminduk_routes() -> Router<AppState> {
    Router::new()
        .route("/api/adminduk", get(list_adminduk))
        .route(
            "/api/adminduk/:warga_id/:jenis",
            put(upload_dokumen).delete(delete_dokumen),
        )
}
