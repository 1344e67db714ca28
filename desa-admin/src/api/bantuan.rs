//! Social-aid endpoints: disbursements, yearly targets, yearly summary

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use desa_common::models::{Bantuan, BantuanInput, RingkasanBantuan, TargetBantuan};

use super::ApiResult;
use crate::AppState;

/// GET /api/bantuan
pub async fn list_bantuan(State(state): State<AppState>) -> ApiResult<Json<Vec<Bantuan>>> {
    Ok(Json(state.service.bantuan.list().await?))
}

/// POST /api/bantuan
pub async fn create_bantuan(
    State(state): State<AppState>,
    Json(input): Json<BantuanInput>,
) -> ApiResult<(StatusCode, Json<Bantuan>)> {
    let bantuan = state.service.bantuan.add(input).await?;
    Ok((StatusCode::CREATED, Json(bantuan)))
}

/// PUT /api/bantuan/:id
pub async fn update_bantuan(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(bantuan): Json<Bantuan>,
) -> ApiResult<Json<Bantuan>> {
    Ok(Json(state.service.bantuan.update(&id, bantuan).await?))
}

/// DELETE /api/bantuan/:id
pub async fn delete_bantuan(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Bantuan>> {
    Ok(Json(state.service.bantuan.delete(&id).await?))
}

/// GET /api/bantuan/ringkasan/:tahun
pub async fn get_ringkasan_bantuan(
    State(state): State<AppState>,
    Path(tahun): Path<i32>,
) -> ApiResult<Json<RingkasanBantuan>> {
    Ok(Json(state.service.bantuan.ringkasan(tahun).await?))
}

/// GET /api/target-bantuan
pub async fn list_target_bantuan(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<TargetBantuan>>> {
    Ok(Json(state.service.bantuan.targets().await?))
}

/// PUT /api/target-bantuan
///
/// Upsert keyed by `tahun`
pub async fn set_target_bantuan(
    State(state): State<AppState>,
    Json(target): Json<TargetBantuan>,
) -> ApiResult<Json<TargetBantuan>> {
    Ok(Json(state.service.bantuan.set_target(target).await?))
}

pub fn bantuan_routes() -> Router<AppState> {
    Router::new()
        .route("/api/bantuan", get(list_bantuan).post(create_bantuan))
        .route("/api/bantuan/:id", put(update_bantuan).delete(delete_bantuan))
        .route("/api/bantuan/ringkasan/:tahun", get(get_ringkasan_bantuan))
        .route(
            "/api/target-bantuan",
            get(list_target_bantuan).put(set_target_bantuan),
        )
}
