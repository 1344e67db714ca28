//! Initial village data written to a fresh store

use crate::models::{
    Adminduk, Bantuan, Dokumen, Dusun, InfoDesa, JenisBantuan, KartuKeluarga, LogAktivitas,
    Pengumuman, Permohonan, PermohonanStatus, StatusBantuan, TargetBantuan, Umkm, Warga,
    WargaField,
};
use crate::store::{keys, Store};
use crate::time::now;
use crate::Result;
use chrono::{Duration, SecondsFormat};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

const FOTO_USAHA: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iMjAwIiBoZWlnaHQ9IjE1MCIgeG1sbnM9Imh0dHA6Ly93d3cudzMub3JnLzIwMDAvc3ZnIj48cmVjdCB3aWR0aD0iMTAwJSIgaGVpZ2h0PSIxMDAlIiBmaWxsPSIjZTVlN2VmIi8+PC9zdmc+";
const CONTOH_PDF: &str = "data:application/pdf;base64,JVBERi0xLjQKJSVFT0YK";
const CONTOH_GAMBAR: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

/// Write the initial data under every key that holds nothing yet
///
/// Returns how many collections were seeded; keys that already hold a value
/// are never touched.
pub async fn seed_if_missing(store: &Store) -> Result<usize> {
    let mut seeded = 0;
    seeded += seed_key(store, keys::INFO_DESA, info_desa()).await?;
    seeded += seed_key(store, keys::WARGA, warga()).await?;
    seeded += seed_key(store, keys::KARTU_KELUARGA, kartu_keluarga()).await?;
    seeded += seed_key(store, keys::BANTUAN, bantuan()).await?;
    seeded += seed_key(store, keys::TARGET_BANTUAN, target_bantuan()).await?;
    seeded += seed_key(store, keys::PENGUMUMAN, pengumuman()).await?;
    seeded += seed_key(store, keys::PERMOHONAN, permohonan()).await?;
    seeded += seed_key(store, keys::UMKM, umkm()).await?;
    seeded += seed_key(store, keys::ADMINDUK, adminduk()).await?;
    seeded += seed_key(store, keys::LOG_AKTIVITAS, Vec::<LogAktivitas>::new()).await?;

    if seeded > 0 {
        info!("Seeded {} collections with initial data", seeded);
    }
    Ok(seeded)
}

async fn seed_key<T>(store: &Store, key: &str, value: T) -> Result<usize>
where
    T: Serialize + DeserializeOwned,
{
    if store.contains(key).await? {
        return Ok(0);
    }
    store.get(key, value).await?;
    Ok(1)
}

fn info_desa() -> InfoDesa {
    InfoDesa {
        nama_desa: "Sukamakmur".to_string(),
        kepala_desa: "Ahmad Subagyo".to_string(),
        dusun: vec![
            dusun("dusun-1", "Krajan"),
            dusun("dusun-2", "Pojok"),
            dusun("dusun-3", "Gebang"),
        ],
        api_key: None,
    }
}

fn dusun(id: &str, nama: &str) -> Dusun {
    Dusun {
        id: id.to_string(),
        nama: nama.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn warga_ajung(
    id: &str,
    nama: &str,
    nik: &str,
    tempat_lahir: &str,
    tanggal_lahir: &str,
    pekerjaan: &str,
    (dusun, rt, rw): (&str, &str, &str),
    kartu_keluarga_id: &str,
    bantuan: StatusBantuan,
) -> Warga {
    Warga {
        id: id.to_string(),
        nama: nama.to_string(),
        nik: nik.to_string(),
        tempat_lahir: tempat_lahir.to_string(),
        tanggal_lahir: tanggal_lahir.to_string(),
        pekerjaan: pekerjaan.to_string(),
        dusun: dusun.to_string(),
        rt: rt.to_string(),
        rw: rw.to_string(),
        desa: "Sukamakmur".to_string(),
        kecamatan: "Ajung".to_string(),
        kabupaten: "Jember".to_string(),
        provinsi: "Jawa Timur".to_string(),
        kartu_keluarga_id: Some(kartu_keluarga_id.to_string()),
        bantuan,
    }
}

fn warga() -> Vec<Warga> {
    let flags = |blt, pkh, lainnya| StatusBantuan { blt, pkh, lainnya };
    vec![
        warga_ajung(
            "warga-1",
            "Budi Santoso",
            "3509211204850001",
            "Jember",
            "1985-04-12",
            "Petani",
            ("Krajan", "01", "01"),
            "kk-1",
            flags(true, false, false),
        ),
        warga_ajung(
            "warga-2",
            "Siti Aminah",
            "3509215507920002",
            "Banyuwangi",
            "1992-07-25",
            "Wiraswasta",
            ("Pojok", "03", "02"),
            "kk-2",
            flags(false, true, false),
        ),
        warga_ajung(
            "warga-3",
            "Joko Susilo",
            "3509210101700003",
            "Jember",
            "1970-01-01",
            "Buruh Tani",
            ("Gebang", "02", "03"),
            "kk-2",
            flags(true, true, true),
        ),
        warga_ajung(
            "warga-4",
            "Dewi Lestari",
            "3509214506880004",
            "Jember",
            "1988-06-05",
            "Ibu Rumah Tangga",
            ("Krajan", "01", "01"),
            "kk-1",
            flags(false, false, false),
        ),
    ]
}

fn kartu_keluarga() -> Vec<KartuKeluarga> {
    vec![
        KartuKeluarga {
            id: "kk-1".to_string(),
            nomor_kk: "3509211001090001".to_string(),
            kepala_keluarga_id: "warga-1".to_string(),
            alamat: "Dusun Krajan, RT 01/RW 01, Desa Sukamakmur".to_string(),
            anggota_ids: vec!["warga-1".to_string(), "warga-4".to_string()],
            tanggal_cetak: "2022-08-10".to_string(),
        },
        KartuKeluarga {
            id: "kk-2".to_string(),
            nomor_kk: "3509212003110007".to_string(),
            kepala_keluarga_id: "warga-2".to_string(),
            alamat: "Dusun Pojok, RT 03/RW 02, Desa Sukamakmur".to_string(),
            anggota_ids: vec!["warga-2".to_string(), "warga-3".to_string()],
            tanggal_cetak: "2023-01-15".to_string(),
        },
    ]
}

fn bantuan() -> Vec<Bantuan> {
    let b = |id: &str, warga_id: &str, jenis, tahun, nominal, keterangan: &str| Bantuan {
        id: id.to_string(),
        warga_id: warga_id.to_string(),
        jenis,
        tahun,
        nominal,
        keterangan: Some(keterangan.to_string()),
    };
    vec![
        b("bantuan-1", "warga-1", JenisBantuan::Blt, 2024, 300_000, "Penyaluran tahap 1"),
        b("bantuan-2", "warga-2", JenisBantuan::Pkh, 2024, 750_000, "Bantuan pendidikan anak"),
        b("bantuan-3", "warga-3", JenisBantuan::Bpnt, 2025, 200_000, "Bantuan pangan"),
        b("bantuan-4", "warga-3", JenisBantuan::Kis, 2025, 42_000, "Iuran bulanan"),
    ]
}

fn target_bantuan() -> Vec<TargetBantuan> {
    vec![
        TargetBantuan {
            tahun: 2024,
            total_anggaran: 50_000_000,
            target_penerima: 150,
        },
        TargetBantuan {
            tahun: 2025,
            total_anggaran: 60_000_000,
            target_penerima: 160,
        },
    ]
}

fn pengumuman() -> Vec<Pengumuman> {
    vec![
        Pengumuman {
            id: "pengumuman-1".to_string(),
            judul: "Jadwal Posyandu Balita".to_string(),
            isi: "Diberitahukan kepada seluruh warga yang memiliki balita, jadwal Posyandu bulan ini akan dilaksanakan pada tanggal 15 Mei 2024 di Balai Desa.".to_string(),
            tanggal: "2024-05-10T10:00:00Z".to_string(),
        },
        Pengumuman {
            id: "pengumuman-2".to_string(),
            judul: "Kerja Bakti Desa".to_string(),
            isi: "Dalam rangka menyambut hari kemerdekaan, akan diadakan kerja bakti serentak pada hari Minggu, 11 Agustus 2024. Diharapkan partisipasi seluruh warga.".to_string(),
            tanggal: "2024-08-01T15:30:00Z".to_string(),
        },
    ]
}

fn permohonan() -> Vec<Permohonan> {
    vec![Permohonan {
        id: "permohonan-1".to_string(),
        warga_id: "warga-4".to_string(),
        warga_nama: "Dewi Lestari".to_string(),
        field: WargaField::Pekerjaan,
        data_lama: "Ibu Rumah Tangga".to_string(),
        data_baru: "Penjahit".to_string(),
        tanggal: "2024-05-20T09:00:00Z".to_string(),
        status: PermohonanStatus::Menunggu,
    }]
}

fn umkm() -> Vec<Umkm> {
    vec![
        Umkm {
            id: "umkm-1".to_string(),
            nama_usaha: "Warung Makan Bu Siti".to_string(),
            pemilik_id: "warga-2".to_string(),
            jenis_usaha: "Kuliner".to_string(),
            deskripsi: "Menjual aneka masakan rumahan, nasi campur, dan minuman segar.".to_string(),
            foto_url: FOTO_USAHA.to_string(),
        },
        Umkm {
            id: "umkm-2".to_string(),
            nama_usaha: "Kerajinan Bambu Pak Budi".to_string(),
            pemilik_id: "warga-1".to_string(),
            jenis_usaha: "Kerajinan".to_string(),
            deskripsi: "Membuat dan menjual berbagai kerajinan tangan dari bambu, seperti kursi, meja, dan hiasan dinding.".to_string(),
            foto_url: FOTO_USAHA.to_string(),
        },
    ]
}

fn adminduk() -> Vec<Adminduk> {
    let days_ago = |days: i64| {
        (now() - Duration::days(days)).to_rfc3339_opts(SecondsFormat::Millis, true)
    };
    let dokumen = |file_name: &str, data_url: &str, uploaded_at: String| {
        Some(Dokumen {
            file_name: file_name.to_string(),
            data_url: data_url.to_string(),
            uploaded_at,
        })
    };

    vec![
        Adminduk {
            kk: dokumen("KK_Budi_Santoso.pdf", CONTOH_PDF, days_ago(5)),
            ktp: dokumen("KTP_Budi_Santoso.jpg", CONTOH_GAMBAR, days_ago(5)),
            ..Adminduk::kosong("warga-1")
        },
        Adminduk {
            ktp: dokumen("KTP_Siti_Aminah.jpg", CONTOH_GAMBAR, days_ago(10)),
            akta_lahir: dokumen("AKTA_SITI.pdf", CONTOH_PDF, days_ago(10)),
            bpjs: dokumen("BPJS_12345.pdf", CONTOH_PDF, days_ago(2)),
            ..Adminduk::kosong("warga-2")
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Collection;

    #[tokio::test]
    async fn test_seed_fresh_store() {
        let store = Store::in_memory();
        assert_eq!(seed_if_missing(&store).await.unwrap(), keys::ALL.len());

        let warga: Vec<Warga> = store.get(keys::WARGA, Vec::new()).await.unwrap();
        assert_eq!(warga.len(), 4);
    }

    #[tokio::test]
    async fn test_seed_never_overwrites() {
        let store = Store::in_memory();
        store.set(keys::WARGA, &Vec::<Warga>::new()).await.unwrap();

        assert_eq!(seed_if_missing(&store).await.unwrap(), keys::ALL.len() - 1);
        let warga: Vec<Warga> = store.get(keys::WARGA, Vec::new()).await.unwrap();
        assert!(warga.is_empty());

        assert_eq!(seed_if_missing(&store).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_seeded_family_cards_are_consistent() {
        let store = Store::in_memory();
        seed_if_missing(&store).await.unwrap();

        let warga = Collection::<Warga>::new(store.clone(), keys::WARGA);
        let kartu = Collection::<KartuKeluarga>::new(store, keys::KARTU_KELUARGA);
        for kk in kartu.all().await.unwrap() {
            assert!(kk.has_anggota(&kk.kepala_keluarga_id));
            for id in &kk.anggota_ids {
                let w = warga.get(id).await.unwrap();
                assert_eq!(w.kartu_keluarga_id.as_deref(), Some(kk.id.as_str()));
            }
        }
    }
}
