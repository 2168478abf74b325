//! Participant CRUD tests — covers creation, retrieval, filtering,
//! updates, and deactivation.
//!
//! Tests the peserta model layer operations:
//! - Participant creation and retrieval by id
//! - Duplicate username detection
//! - Listing with bidang and active-only filters
//! - Updates (username stays fixed)
//! - Deactivation instead of deletion

use ppg_admin::models::peserta::{self, NewPeserta, PesertaUpdate};
use ppg_admin::models::status::Role;

mod common;
use common::*;

const TEST_NAMA: &str = "Siti Aminah";
const TEST_USERNAME: &str = "siti";

#[test]
fn test_create_peserta_success() {
    let (_dir, conn) = setup_test_db();

    let new = NewPeserta {
        nama: TEST_NAMA.to_string(),
        username: TEST_USERNAME.to_string(),
        password: "hash".to_string(),
        role: Role::Pengurus,
        bidang: "keputrian".to_string(),
    };
    let id = peserta::create(&conn, &new).expect("Failed to create peserta");
    assert!(id > 0);

    let found = peserta::find_display_by_id(&conn, id)
        .expect("Query failed")
        .expect("Peserta not found");

    assert_eq!(found.nama, TEST_NAMA);
    assert_eq!(found.username, TEST_USERNAME);
    assert_eq!(found.role, Role::Pengurus);
    assert_eq!(found.role_label, "Pengurus");
    assert!(found.aktif);
}

#[test]
fn test_username_exists_detects_duplicate() {
    let (_dir, conn) = setup_test_db();

    create_peserta(&conn, TEST_NAMA, TEST_USERNAME, "peserta", "", true);

    assert!(peserta::username_exists(&conn, TEST_USERNAME).expect("Query failed"));
    assert!(!peserta::username_exists(&conn, "lain").expect("Query failed"));
}

#[test]
fn test_find_all_filters_by_bidang() {
    let (_dir, conn) = setup_test_db();

    create_peserta(&conn, "Ahmad", "ahmad", "peserta", "kurikulum", true);
    create_peserta(&conn, "Bilal", "bilal", "peserta", "kurikulum", true);
    create_peserta(&conn, "Citra", "citra", "peserta", "keputrian", true);

    let kurikulum = peserta::find_all(&conn, Some("kurikulum"), false)
        .expect("Query failed");
    assert_eq!(kurikulum.len(), 2);
    assert!(kurikulum.iter().all(|p| p.bidang == "kurikulum"));

    let semua = peserta::find_all(&conn, None, false).expect("Query failed");
    assert_eq!(semua.len(), 3);
}

#[test]
fn test_find_all_active_only_excludes_inactive() {
    let (_dir, conn) = setup_test_db();

    create_peserta(&conn, "Ahmad", "ahmad", "peserta", "", true);
    let nonaktif = create_peserta(&conn, "Bilal", "bilal", "peserta", "", false);

    let aktif = peserta::find_all(&conn, None, true).expect("Query failed");
    assert_eq!(aktif.len(), 1);
    assert!(aktif.iter().all(|p| p.id != nonaktif));
}

#[test]
fn test_update_changes_profile_not_username() {
    let (_dir, conn) = setup_test_db();

    let id = create_peserta(&conn, TEST_NAMA, TEST_USERNAME, "peserta", "", true);

    let upd = PesertaUpdate {
        nama: "Siti A. Rahma".to_string(),
        role: Role::Admin,
        bidang: "sarana".to_string(),
        aktif: true,
    };
    let changed = peserta::update(&conn, id, &upd).expect("Failed to update");
    assert!(changed);

    let found = peserta::find_display_by_id(&conn, id)
        .expect("Query failed")
        .expect("Peserta not found");

    assert_eq!(found.nama, "Siti A. Rahma");
    assert_eq!(found.role, Role::Admin);
    assert_eq!(found.bidang, "sarana");
    // Username is the login identity and never changes on edit
    assert_eq!(found.username, TEST_USERNAME);
}

#[test]
fn test_update_missing_peserta_returns_false() {
    let (_dir, conn) = setup_test_db();

    let upd = PesertaUpdate {
        nama: "Tidak Ada".to_string(),
        role: Role::Peserta,
        bidang: String::new(),
        aktif: true,
    };
    let changed = peserta::update(&conn, 999, &upd).expect("Update query failed");
    assert!(!changed);
}

#[test]
fn test_deactivate_keeps_row() {
    let (_dir, conn) = setup_test_db();

    let id = create_peserta(&conn, TEST_NAMA, TEST_USERNAME, "peserta", "", true);

    let changed = peserta::deactivate(&conn, id).expect("Failed to deactivate");
    assert!(changed);

    // The row survives so history keeps pointing at a real person
    let found = peserta::find_display_by_id(&conn, id)
        .expect("Query failed")
        .expect("Peserta not found");
    assert!(!found.aktif);
}

#[test]
fn test_count_aktif() {
    let (_dir, conn) = setup_test_db();

    create_peserta(&conn, "Ahmad", "ahmad", "peserta", "", true);
    create_peserta(&conn, "Bilal", "bilal", "peserta", "", true);
    create_peserta(&conn, "Citra", "citra", "peserta", "", false);

    assert_eq!(peserta::count_aktif(&conn).expect("Query failed"), 2);
}
