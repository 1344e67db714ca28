//! desa-admin library - village administration HTTP service
//!
//! JSON API over the registries of `desa-common`. Every handler delegates to
//! one registry operation; the router only adds request tracing.

use axum::Router;
use desa_common::DesaService;
use tower_http::trace::TraceLayer;

pub mod api;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub service: DesaService,
}

impl AppState {
    pub fn new(service: DesaService) -> Self {
        Self { service }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::dashboard_routes())
        .merge(api::warga_routes())
        .merge(api::kartu_keluarga_routes())
        .merge(api::permohonan_routes())
        .merge(api::bantuan_routes())
        .merge(api::pengumuman_routes())
        .merge(api::umkm_routes())
        .merge(api::adminduk_routes())
        .merge(api::info_desa_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
