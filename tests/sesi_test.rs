//! Session CRUD tests — covers creation, listing, edits, status changes,
//! and the explicit assignment list.
//!
//! Tests the sesi model layer operations:
//! - Session creation and retrieval with assignment counts
//! - Listing filtered by status
//! - Edits that must not touch the auto-assignment rule
//! - Status transitions and the cancelled-not-deleted policy
//! - Explicit assignment and removal of participants

use ppg_admin::models::sesi::{self, NewSesi};
use ppg_admin::models::status::StatusSesi;

mod common;
use common::*;

const TEST_NAMA: &str = "Musyawarah Bulanan";
const TEST_TANGGAL: &str = "2026-09-05";

fn contoh_sesi() -> NewSesi {
    NewSesi {
        nama: TEST_NAMA.to_string(),
        deskripsi: "Evaluasi program bulan lalu".to_string(),
        tanggal: TEST_TANGGAL.to_string(),
        waktu_mulai: "19:30".to_string(),
        waktu_selesai: "21:30".to_string(),
        lokasi: "Masjid Baitul Makmur".to_string(),
        kapasitas: 40,
        target_bidang: String::new(),
    }
}

#[test]
fn test_create_sesi_success() {
    let (_dir, conn) = setup_test_db();

    let id = sesi::create(&conn, &contoh_sesi()).expect("Failed to create sesi");
    assert!(id > 0);

    let found = sesi::find_display_by_id(&conn, id)
        .expect("Query failed")
        .expect("Sesi not found");

    assert_eq!(found.nama, TEST_NAMA);
    assert_eq!(found.status, StatusSesi::Scheduled);
    assert_eq!(found.status_label, "Terjadwal");
    assert_eq!(found.jumlah_ditugaskan, 0);
}

#[test]
fn test_find_all_filters_by_status() {
    let (_dir, conn) = setup_test_db();

    create_sesi(&conn, "Sesi A", "2026-09-01", "scheduled");
    create_sesi(&conn, "Sesi B", "2026-09-02", "completed");
    create_sesi(&conn, "Sesi C", "2026-09-03", "scheduled");

    let terjadwal = sesi::find_all(&conn, Some(StatusSesi::Scheduled))
        .expect("Query failed");
    assert_eq!(terjadwal.len(), 2);

    let semua = sesi::find_all(&conn, None).expect("Query failed");
    assert_eq!(semua.len(), 3);
    // Newest date first
    assert_eq!(semua[0].nama, "Sesi C");
}

#[test]
fn test_update_preserves_target_bidang() {
    let (_dir, conn) = setup_test_db();

    let id = sesi::create(&conn, &contoh_sesi()).expect("Failed to create sesi");
    sesi::set_target_bidang(&conn, id, "kurikulum,keputrian")
        .expect("Failed to set target");

    // An ordinary edit carries no target list and must not clear it
    let mut upd = contoh_sesi();
    upd.lokasi = "Aula PPG".to_string();
    let changed = sesi::update(&conn, id, &upd).expect("Failed to update");
    assert!(changed);

    let found = sesi::find_by_id(&conn, id)
        .expect("Query failed")
        .expect("Sesi not found");
    assert_eq!(found.lokasi, "Aula PPG");
    assert_eq!(found.target_bidang, "kurikulum,keputrian");
    assert_eq!(found.target_bidang_list(), vec!["kurikulum", "keputrian"]);
}

#[test]
fn test_update_status_to_cancelled_keeps_row() {
    let (_dir, conn) = setup_test_db();

    let id = sesi::create(&conn, &contoh_sesi()).expect("Failed to create sesi");

    let changed = sesi::update_status(&conn, id, StatusSesi::Cancelled)
        .expect("Failed to update status");
    assert!(changed);

    // Cancelled sessions stay queryable so minutes and attendance keep
    // their anchor
    let found = sesi::find_by_id(&conn, id)
        .expect("Query failed")
        .expect("Sesi not found");
    assert_eq!(found.status, StatusSesi::Cancelled);
}

#[test]
fn test_assign_and_unassign_peserta() {
    let (_dir, conn) = setup_test_db();

    let sesi_id = sesi::create(&conn, &contoh_sesi()).expect("Failed to create sesi");
    let peserta_id = create_peserta(&conn, "Ahmad", "ahmad", "peserta", "", true);

    let added = sesi::assign_peserta(&conn, sesi_id, peserta_id)
        .expect("Failed to assign");
    assert!(added);
    assert!(sesi::is_assigned(&conn, sesi_id, peserta_id).expect("Query failed"));

    // Assigning again is a no-op, not an error
    let again = sesi::assign_peserta(&conn, sesi_id, peserta_id)
        .expect("Repeat assign failed");
    assert!(!again);

    let removed = sesi::unassign_peserta(&conn, sesi_id, peserta_id)
        .expect("Failed to unassign");
    assert!(removed);
    assert!(!sesi::is_assigned(&conn, sesi_id, peserta_id).expect("Query failed"));
}

#[test]
fn test_assignment_count_in_display() {
    let (_dir, conn) = setup_test_db();

    let sesi_id = sesi::create(&conn, &contoh_sesi()).expect("Failed to create sesi");
    let a = create_peserta(&conn, "Ahmad", "ahmad", "peserta", "", true);
    let b = create_peserta(&conn, "Bilal", "bilal", "peserta", "", true);
    assign(&conn, sesi_id, a);
    assign(&conn, sesi_id, b);

    let found = sesi::find_display_by_id(&conn, sesi_id)
        .expect("Query failed")
        .expect("Sesi not found");
    assert_eq!(found.jumlah_ditugaskan, 2);
}

#[test]
fn test_count_on_date_skips_cancelled() {
    let (_dir, conn) = setup_test_db();

    create_sesi(&conn, "Pagi", TEST_TANGGAL, "scheduled");
    create_sesi(&conn, "Siang", TEST_TANGGAL, "active");
    create_sesi(&conn, "Malam", TEST_TANGGAL, "cancelled");
    create_sesi(&conn, "Lain Hari", "2026-09-06", "scheduled");

    let jumlah = sesi::count_on_date(&conn, TEST_TANGGAL).expect("Query failed");
    assert_eq!(jumlah, 2);
}
