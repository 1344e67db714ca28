//! HTTP API handlers for desa-admin

pub mod adminduk;
pub mod bantuan;
pub mod buildinfo;
pub mod dashboard;
pub mod error;
pub mod health;
pub mod info_desa;
pub mod kartu_keluarga;
pub mod pengumuman;
pub mod permohonan;
pub mod umkm;
pub mod warga;

pub use adminduk::adminduk_routes;
pub use bantuan::bantuan_routes;
pub use buildinfo::get_build_info;
pub use dashboard::dashboard_routes;
pub use error::ApiError;
pub use health::health_routes;
pub use info_desa::info_desa_routes;
pub use kartu_keluarga::kartu_keluarga_routes;
pub use pengumuman::pengumuman_routes;
pub use permohonan::permohonan_routes;
pub use umkm::umkm_routes;
pub use warga::warga_routes;

/// Result type of every fallible handler
pub type ApiResult<T> = Result<T, ApiError>;
