//! Stable key of every persisted collection

pub const WARGA: &str = "warga";
pub const KARTU_KELUARGA: &str = "kartuKeluarga";
pub const BANTUAN: &str = "bantuan";
pub const TARGET_BANTUAN: &str = "targetBantuan";
pub const PENGUMUMAN: &str = "pengumuman";
pub const PERMOHONAN: &str = "permohonan";
pub const INFO_DESA: &str = "infoDesa";
pub const LOG_AKTIVITAS: &str = "logAktivitas";
pub const UMKM: &str = "umkm";
pub const ADMINDUK: &str = "adminduk";

/// Every key, in the order a snapshot reports them
pub const ALL: [&str; 10] = [
    WARGA,
    KARTU_KELUARGA,
    BANTUAN,
    TARGET_BANTUAN,
    PENGUMUMAN,
    PERMOHONAN,
    INFO_DESA,
    LOG_AKTIVITAS,
    UMKM,
    ADMINDUK,
];
