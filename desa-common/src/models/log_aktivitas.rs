//! Activity log entries

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogAktivitas {
    pub id: String,
    pub tanggal: String,
    pub pengguna: String,
    pub aktivitas: String,
}
