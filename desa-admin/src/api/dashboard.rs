//! Whole-store views: snapshot, headline summary, activity log

use axum::{extract::State, routing::get, Json, Router};
use desa_common::models::LogAktivitas;
use desa_common::registry::{Ringkasan, Snapshot};

use super::ApiResult;
use crate::AppState;

/// GET /api/snapshot
///
/// Every collection in one response, as the dashboard reloads after a mutation
pub async fn get_snapshot(State(state): State<AppState>) -> ApiResult<Json<Snapshot>> {
    Ok(Json(state.service.snapshot().await?))
}

/// GET /api/ringkasan
pub async fn get_ringkasan(State(state): State<AppState>) -> ApiResult<Json<Ringkasan>> {
    Ok(Json(state.service.ringkasan().await?))
}

/// GET /api/log-aktivitas
///
/// Newest first, at most 100 entries
pub async fn list_log(State(state): State<AppState>) -> ApiResult<Json<Vec<LogAktivitas>>> {
    Ok(Json(state.service.log.list().await?))
}

pub fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/api/snapshot", get(get_snapshot))
        .route("/api/ringkasan", get(get_ringkasan))
        .route("/api/log-aktivitas", get(list_log))
}
