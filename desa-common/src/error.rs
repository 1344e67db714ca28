//! Common error types for the desa service

use thiserror::Error;

/// Common result type for desa operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by every registry
///
/// Every mutating operation validates before it writes, so any of these
/// leaves previously persisted state untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// Referenced entity does not exist
    #[error("{0} tidak ditemukan")]
    NotFound(String),

    /// Unique-key collision (e.g. family-card number)
    #[error("{0}")]
    Duplicate(String),

    /// Required field missing or payload rejected
    #[error("Data tidak valid: {0}")]
    Validation(String),

    /// Imported family card names a head who is not among its members
    #[error("Kepala keluarga dengan NIK {nik} tidak ditemukan di antara anggota")]
    HeadNotFound { nik: String },

    /// Change request is already in a terminal state
    #[error("Permohonan {id} sudah berstatus {from}, tidak dapat diubah menjadi {to}")]
    InvalidTransition { id: String, from: String, to: String },

    /// Injected store failure standing in for a server error
    #[error("Operasi gagal. Terjadi kesalahan pada server simulasi.")]
    SimulatedFailure,

    /// Database operation error (wraps sqlx::Error)
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Stored blob could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn not_found(what: impl Into<String>) -> Self {
        Error::NotFound(what.into())
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }
}
