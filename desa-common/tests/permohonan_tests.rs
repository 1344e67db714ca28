//! Integration tests for the change-request workflow

use desa_common::models::{PermohonanInput, PermohonanStatus, WargaField, WargaInput};
use desa_common::store::Store;
use desa_common::{DesaService, Error};

async fn service_with_resident(pekerjaan: &str) -> (DesaService, String) {
    let service = DesaService::new(Store::in_memory());
    let warga = service
        .warga
        .add(WargaInput {
            nama: "Siti".to_string(),
            nik: "3201000000000001".to_string(),
            pekerjaan: pekerjaan.to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    (service, warga.id)
}

fn ubah_pekerjaan(warga_id: &str, baru: &str) -> PermohonanInput {
    PermohonanInput {
        warga_id: warga_id.to_string(),
        field: WargaField::Pekerjaan,
        data_baru: baru.to_string(),
    }
}

#[tokio::test]
async fn test_submit_captures_current_value() {
    let (service, warga_id) = service_with_resident("Petani").await;

    let request = service
        .permohonan
        .submit(ubah_pekerjaan(&warga_id, "Penjahit"))
        .await
        .unwrap();

    assert_eq!(request.status, PermohonanStatus::Menunggu);
    assert_eq!(request.data_lama, "Petani");
    assert_eq!(request.data_baru, "Penjahit");
    assert_eq!(request.warga_nama, "Siti");
    assert_eq!(service.permohonan.list().await.unwrap()[0], request);
}

#[tokio::test]
async fn test_submit_for_unknown_resident_fails() {
    let (service, _) = service_with_resident("Petani").await;
    let result = service
        .permohonan
        .submit(ubah_pekerjaan("warga-tidak-ada", "Penjahit"))
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert!(service.permohonan.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_approve_applies_new_value() {
    let (service, warga_id) = service_with_resident("Petani").await;
    let request = service
        .permohonan
        .submit(ubah_pekerjaan(&warga_id, "Penjahit"))
        .await
        .unwrap();

    let decided = service
        .permohonan
        .set_status(&request.id, PermohonanStatus::Disetujui)
        .await
        .unwrap();

    assert_eq!(decided.status, PermohonanStatus::Disetujui);
    assert_eq!(service.warga.get(&warga_id).await.unwrap().pekerjaan, "Penjahit");
    assert_eq!(
        service.permohonan.get(&request.id).await.unwrap().status,
        PermohonanStatus::Disetujui
    );

    let log = service.log.list().await.unwrap();
    assert!(log[0].aktivitas.contains("Siti"));
    assert!(log[0].aktivitas.contains("Disetujui"));
}

#[tokio::test]
async fn test_reject_leaves_resident_untouched() {
    let (service, warga_id) = service_with_resident("Petani").await;
    let before = service.warga.get(&warga_id).await.unwrap();
    let request = service
        .permohonan
        .submit(ubah_pekerjaan(&warga_id, "Penjahit"))
        .await
        .unwrap();

    service
        .permohonan
        .set_status(&request.id, PermohonanStatus::Ditolak)
        .await
        .unwrap();

    assert_eq!(service.warga.get(&warga_id).await.unwrap(), before);
    assert_eq!(
        service.permohonan.get(&request.id).await.unwrap().status,
        PermohonanStatus::Ditolak
    );
}

#[tokio::test]
async fn test_approve_after_resident_deleted() {
    let (service, warga_id) = service_with_resident("Petani").await;
    let request = service
        .permohonan
        .submit(ubah_pekerjaan(&warga_id, "Penjahit"))
        .await
        .unwrap();
    service.warga.delete(&warga_id).await.unwrap();

    let decided = service
        .permohonan
        .set_status(&request.id, PermohonanStatus::Disetujui)
        .await
        .unwrap();

    assert_eq!(decided.status, PermohonanStatus::Disetujui);
    assert!(service.warga.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_decided_request_cannot_change_again() {
    let (service, warga_id) = service_with_resident("Petani").await;
    let request = service
        .permohonan
        .submit(ubah_pekerjaan(&warga_id, "Penjahit"))
        .await
        .unwrap();
    service
        .permohonan
        .set_status(&request.id, PermohonanStatus::Ditolak)
        .await
        .unwrap();

    let result = service
        .permohonan
        .set_status(&request.id, PermohonanStatus::Disetujui)
        .await;

    match result {
        Err(Error::InvalidTransition { from, to, .. }) => {
            assert_eq!(from, "Ditolak");
            assert_eq!(to, "Disetujui");
        }
        other => panic!("expected InvalidTransition, got {:?}", other),
    }
    // The rejected request never touched the resident
    assert_eq!(service.warga.get(&warga_id).await.unwrap().pekerjaan, "Petani");
}

#[tokio::test]
async fn test_back_to_pending_is_rejected() {
    let (service, warga_id) = service_with_resident("Petani").await;
    let request = service
        .permohonan
        .submit(ubah_pekerjaan(&warga_id, "Penjahit"))
        .await
        .unwrap();

    let result = service
        .permohonan
        .set_status(&request.id, PermohonanStatus::Menunggu)
        .await;
    assert!(matches!(result, Err(Error::InvalidTransition { .. })));
}

#[tokio::test]
async fn test_unknown_request_is_not_found() {
    let (service, _) = service_with_resident("Petani").await;
    let result = service
        .permohonan
        .set_status("permohonan-x", PermohonanStatus::Disetujui)
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn test_invalid_date_value_rejected_on_submit() {
    let (service, warga_id) = service_with_resident("Petani").await;
    let result = service
        .permohonan
        .submit(PermohonanInput {
            warga_id,
            field: WargaField::TanggalLahir,
            data_baru: "17/08/1990".to_string(),
        })
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}
