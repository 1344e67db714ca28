//! # Desa Common Library
//!
//! Shared code for the village administration service:
//! - Error type and result alias
//! - Bootstrap configuration and root folder resolution
//! - Key-value store abstraction (SQLite and in-memory backends)
//! - Entity models (warga, kartu keluarga, permohonan, ...)
//! - Registries implementing every read and mutation
//! - Seed data for a freshly created store

pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod ids;
pub mod models;
pub mod registry;
pub mod seed;
pub mod store;
pub mod time;

pub use error::{Error, Result};
pub use registry::DesaService;
