//! Entity models, serialized with the camelCase field names the stored
//! collections use

pub mod adminduk;
pub mod bantuan;
pub mod info_desa;
pub mod kartu_keluarga;
pub mod log_aktivitas;
pub mod pengumuman;
pub mod permohonan;
pub mod umkm;
pub mod warga;

pub use adminduk::{Adminduk, Dokumen, JenisDokumen, MAX_DOKUMEN_BYTES};
pub use bantuan::{Bantuan, BantuanInput, JenisBantuan, RingkasanBantuan, TargetBantuan};
pub use info_desa::{Dusun, InfoDesa};
pub use kartu_keluarga::{KartuKeluarga, KkImport, KkImportOutcome};
pub use log_aktivitas::LogAktivitas;
pub use pengumuman::{Pengumuman, PengumumanInput};
pub use permohonan::{Permohonan, PermohonanInput, PermohonanStatus};
pub use umkm::{Umkm, UmkmInput};
pub use warga::{StatusBantuan, Warga, WargaField, WargaInput};
