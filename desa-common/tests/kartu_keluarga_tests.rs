//! Integration tests for the family-card registry
//!
//! Tests cover:
//! - QR import: new residents, NIK reuse, back-references, head resolution
//! - Import guards: duplicate card number (checked first), missing head (no state change)
//! - Card deletion: back-references cleared on exactly the former members

use desa_common::models::{KkImport, StatusBantuan, Warga, WargaInput};
use desa_common::store::{keys, Store};
use desa_common::{DesaService, Error};

fn payload(nama: &str, nik: &str) -> WargaInput {
    WargaInput {
        nama: nama.to_string(),
        nik: nik.to_string(),
        pekerjaan: "Petani".to_string(),
        dusun: "Krajan".to_string(),
        ..Default::default()
    }
}

fn kk_import(nomor: &str, kepala: WargaInput, anggota: Vec<WargaInput>) -> KkImport {
    KkImport {
        nomor_kk: nomor.to_string(),
        kepala_keluarga: kepala,
        anggota,
        alamat: "Dusun Krajan, RT 01/RW 01".to_string(),
        tanggal_cetak: "2024-01-01".to_string(),
    }
}

/// Raw stored blobs of the resident and card collections
async fn raw_state(store: &Store) -> (serde_json::Value, serde_json::Value) {
    (
        store.get(keys::WARGA, serde_json::json!([])).await.unwrap(),
        store.get(keys::KARTU_KELUARGA, serde_json::json!([])).await.unwrap(),
    )
}

#[tokio::test]
async fn test_import_scenario_two_new_residents() {
    let service = DesaService::new(Store::in_memory());
    let kepala = payload("Kepala", "111");

    let outcome = service
        .kartu_keluarga
        .import(kk_import(
            "KK-001",
            kepala.clone(),
            vec![kepala, payload("Anak", "222")],
        ))
        .await
        .unwrap();

    let warga = service.warga.list().await.unwrap();
    assert_eq!(warga.len(), 2);
    assert_eq!(outcome.warga_baru, 2);

    let cards = service.kartu_keluarga.list().await.unwrap();
    assert_eq!(cards.len(), 1);
    let card = &cards[0];
    assert_eq!(card.nomor_kk, "KK-001");
    assert_eq!(card.anggota_ids.len(), 2);
    assert_eq!(card, &outcome.kartu_keluarga);

    for w in &warga {
        assert_eq!(w.kartu_keluarga_id.as_deref(), Some(card.id.as_str()));
        assert_eq!(w.bantuan, StatusBantuan::tidak_ada());
    }

    let kepala = warga.iter().find(|w| w.nik == "111").unwrap();
    assert_eq!(card.kepala_keluarga_id, kepala.id);
    assert!(card.has_anggota(&kepala.id));
}

#[tokio::test]
async fn test_import_reuses_existing_resident_by_nik() {
    let service = DesaService::new(Store::in_memory());
    let existing = service.warga.add(payload("Budi", "111")).await.unwrap();

    let outcome = service
        .kartu_keluarga
        .import(kk_import(
            "KK-002",
            payload("Budi (QR)", "111"),
            vec![
                payload("Budi (QR)", "111"),
                payload("Istri", "222"),
                payload("Anak", "333"),
            ],
        ))
        .await
        .unwrap();

    let warga = service.warga.list().await.unwrap();
    // Only the genuinely new NIKs were added
    assert_eq!(warga.len(), 3);
    assert_eq!(outcome.warga_baru, 2);

    let card = outcome.kartu_keluarga;
    assert_eq!(card.kepala_keluarga_id, existing.id);
    assert_eq!(card.anggota_ids.len(), 3);
    assert!(card.has_anggota(&existing.id));

    // Reused resident keeps its own data, only the back-reference changes
    let reused = service.warga.get(&existing.id).await.unwrap();
    assert_eq!(reused.nama, "Budi");
    assert_eq!(reused.kartu_keluarga_id.as_deref(), Some(card.id.as_str()));
}

#[tokio::test]
async fn test_import_repeated_nik_counts_once() {
    let service = DesaService::new(Store::in_memory());

    let outcome = service
        .kartu_keluarga
        .import(kk_import(
            "KK-003",
            payload("Kepala", "111"),
            vec![payload("Kepala", "111"), payload("Kepala lagi", "111")],
        ))
        .await
        .unwrap();

    assert_eq!(outcome.kartu_keluarga.anggota_ids.len(), 1);
    assert_eq!(service.warga.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_import_duplicate_number_changes_nothing() {
    let store = Store::in_memory();
    let service = DesaService::new(store.clone());
    let kepala = payload("Kepala", "111");
    service
        .kartu_keluarga
        .import(kk_import("KK-001", kepala.clone(), vec![kepala]))
        .await
        .unwrap();

    let before = raw_state(&store).await;
    let result = service
        .kartu_keluarga
        .import(kk_import(
            "KK-001",
            payload("Lain", "999"),
            vec![payload("Lain", "999"), payload("Baru", "888")],
        ))
        .await;

    assert!(matches!(result, Err(Error::Duplicate(_))));
    assert_eq!(raw_state(&store).await, before);
}

#[tokio::test]
async fn test_duplicate_number_reported_before_member_errors() {
    let service = DesaService::new(Store::in_memory());
    let kepala = payload("Kepala", "111");
    service
        .kartu_keluarga
        .import(kk_import("KK-001", kepala.clone(), vec![kepala.clone()]))
        .await
        .unwrap();

    let result = service
        .kartu_keluarga
        .import(kk_import(
            "KK-001",
            kepala.clone(),
            vec![kepala, payload("", "222")],
        ))
        .await;
    assert!(matches!(result, Err(Error::Duplicate(_))));

    // A fresh number with the same members is a validation error
    let result = service
        .kartu_keluarga
        .import(kk_import(
            "KK-002",
            payload("Kepala", "111"),
            vec![payload("", "222")],
        ))
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_import_head_not_among_members_changes_nothing() {
    let store = Store::in_memory();
    let service = DesaService::new(store.clone());
    // Head exists as a resident but is not listed on the card
    service.warga.add(payload("Kepala", "111")).await.unwrap();
    let before = raw_state(&store).await;

    let result = service
        .kartu_keluarga
        .import(kk_import(
            "KK-004",
            payload("Kepala", "111"),
            vec![payload("Anak", "222")],
        ))
        .await;

    assert!(matches!(result, Err(Error::HeadNotFound { ref nik }) if nik == "111"));
    assert_eq!(raw_state(&store).await, before);
}

#[tokio::test]
async fn test_import_rejects_member_without_nik() {
    let service = DesaService::new(Store::in_memory());
    let result = service
        .kartu_keluarga
        .import(kk_import(
            "KK-005",
            payload("Kepala", "111"),
            vec![payload("Kepala", "111"), payload("Tanpa NIK", "")],
        ))
        .await;

    assert!(matches!(result, Err(Error::Validation(_))));
    assert!(service.warga.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_import_logs_head_and_number() {
    let service = DesaService::new(Store::in_memory());
    let kepala = payload("Slamet", "111");
    service
        .kartu_keluarga
        .import(kk_import("KK-777", kepala.clone(), vec![kepala]))
        .await
        .unwrap();

    let log = service.log.list().await.unwrap();
    assert!(log[0].aktivitas.contains("KK-777"));
    assert!(log[0].aktivitas.contains("Slamet"));
}

#[tokio::test]
async fn test_import_store_failure_leaves_state() {
    let store = Store::in_memory();
    let service = DesaService::new(store.clone());
    let before = raw_state(&store).await;

    store.inject_write_failure(true);
    let kepala = payload("Kepala", "111");
    let result = service
        .kartu_keluarga
        .import(kk_import("KK-010", kepala.clone(), vec![kepala]))
        .await;
    store.inject_write_failure(false);

    assert!(matches!(result, Err(Error::SimulatedFailure)));
    assert_eq!(raw_state(&store).await, before);
}

#[tokio::test]
async fn test_delete_clears_exactly_former_members() {
    let service = DesaService::new(Store::in_memory());
    let outsider = service.warga.add(payload("Tetangga", "900")).await.unwrap();

    let first = service
        .kartu_keluarga
        .import(kk_import(
            "KK-A",
            payload("A1", "101"),
            vec![payload("A1", "101"), payload("A2", "102")],
        ))
        .await
        .unwrap();
    let second = service
        .kartu_keluarga
        .import(kk_import("KK-B", payload("B1", "201"), vec![payload("B1", "201")]))
        .await
        .unwrap();

    let removed = service
        .kartu_keluarga
        .delete(&first.kartu_keluarga.id)
        .await
        .unwrap();
    assert_eq!(removed.nomor_kk, "KK-A");

    let cards = service.kartu_keluarga.list().await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].id, second.kartu_keluarga.id);

    let warga: Vec<Warga> = service.warga.list().await.unwrap();
    // Residents are unlinked, not deleted
    assert_eq!(warga.len(), 4);
    for w in &warga {
        match w.nik.as_str() {
            "101" | "102" => assert!(w.kartu_keluarga_id.is_none()),
            "201" => assert_eq!(
                w.kartu_keluarga_id.as_deref(),
                Some(second.kartu_keluarga.id.as_str())
            ),
            _ => assert_eq!(w.id, outsider.id),
        }
    }
    assert!(service.warga.get(&outsider.id).await.unwrap().kartu_keluarga_id.is_none());

    let log = service.log.list().await.unwrap();
    assert!(log[0].aktivitas.contains("KK-A"));
}

#[tokio::test]
async fn test_delete_unknown_card_is_not_found() {
    let service = DesaService::new(Store::in_memory());
    assert!(matches!(
        service.kartu_keluarga.delete("kk-tidak-ada").await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn test_anggota_lists_members_in_card_order() {
    let service = DesaService::new(Store::in_memory());
    let outcome = service
        .kartu_keluarga
        .import(kk_import(
            "KK-C",
            payload("C1", "301"),
            vec![payload("C1", "301"), payload("C2", "302")],
        ))
        .await
        .unwrap();

    let anggota = service
        .kartu_keluarga
        .anggota(&outcome.kartu_keluarga.id)
        .await
        .unwrap();
    let niks: Vec<&str> = anggota.iter().map(|w| w.nik.as_str()).collect();
    assert_eq!(niks, vec!["301", "302"]);
    assert_eq!(anggota, outcome.anggota);
}
