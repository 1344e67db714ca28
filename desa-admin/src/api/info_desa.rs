//! Village info endpoints and connection key management

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use desa_common::models::InfoDesa;

use super::ApiResult;
use crate::AppState;

/// GET /api/info-desa
pub async fn get_info_desa(State(state): State<AppState>) -> ApiResult<Json<InfoDesa>> {
    Ok(Json(state.service.info_desa.get().await?))
}

/// PUT /api/info-desa
///
/// Any `apiKey` in the body is ignored; use the api-key routes
pub async fn update_info_desa(
    State(state): State<AppState>,
    Json(info): Json<InfoDesa>,
) -> ApiResult<Json<InfoDesa>> {
    Ok(Json(state.service.info_desa.update(info).await?))
}

/// POST /api/info-desa/api-key
pub async fn generate_api_key(State(state): State<AppState>) -> ApiResult<Json<InfoDesa>> {
    Ok(Json(state.service.info_desa.generate_api_key().await?))
}

/// DELETE /api/info-desa/api-key
pub async fn revoke_api_key(State(state): State<AppState>) -> ApiResult<Json<InfoDesa>> {
    Ok(Json(state.service.info_desa.revoke_api_key().await?))
}

pub fn info_desa_routes() -> Router<AppState> {
    Router::new()
        .route("/api/info-desa", get(get_info_desa).put(update_info_desa))
        .route(
            "/api/info-desa/api-key",
            post(generate_api_key).delete(revoke_api_key),
        )
}
