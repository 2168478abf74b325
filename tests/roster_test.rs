//! Roster resolution tests — covers the union of the explicit assignment
//! list with the auto-assign-by-field rule.
//!
//! Tests the sesi roster operations:
//! - Union of explicit assignments and target-bidang matches
//! - Deduplication when both paths pick the same person
//! - Exclusion of inactive participants from either path
//! - Deterministic ordering by name, then id
//! - Sessions with no rule and with empty results

use ppg_admin::models::sesi::{self, roster};

mod common;
use common::*;

const TEST_TANGGAL: &str = "2026-09-05";

fn sesi_dengan_target(conn: &rusqlite::Connection, target: &str) -> i64 {
    let id = create_sesi(conn, "Musyawarah", TEST_TANGGAL, "scheduled");
    sesi::set_target_bidang(conn, id, target).expect("Failed to set target");
    id
}

fn resolve_roster(conn: &rusqlite::Connection, sesi_id: i64) -> Vec<roster::RosterEntry> {
    let sesi = sesi::find_by_id(conn, sesi_id)
        .expect("Query failed")
        .expect("Sesi not found");
    roster::resolve(conn, &sesi).expect("Roster resolution failed")
}

#[test]
fn test_union_of_explicit_and_target_bidang() {
    let (_dir, conn) = setup_test_db();

    let ahmad = create_peserta(&conn, "Ahmad", "ahmad", "peserta", "kurikulum", true);
    let bilal = create_peserta(&conn, "Bilal", "bilal", "peserta", "sarana", true);
    create_peserta(&conn, "Citra", "citra", "peserta", "keputrian", true);

    let sesi_id = sesi_dengan_target(&conn, "kurikulum");
    assign(&conn, sesi_id, bilal);

    let entri = resolve_roster(&conn, sesi_id);

    // Ahmad arrives via his bidang, Bilal via the explicit list
    assert_eq!(entri.len(), 2);
    assert_eq!(entri[0].peserta_id, ahmad);
    assert!(!entri[0].ditugaskan_manual);
    assert_eq!(entri[1].peserta_id, bilal);
    assert!(entri[1].ditugaskan_manual);
}

#[test]
fn test_person_on_both_paths_appears_once() {
    let (_dir, conn) = setup_test_db();

    let ahmad = create_peserta(&conn, "Ahmad", "ahmad", "peserta", "kurikulum", true);

    let sesi_id = sesi_dengan_target(&conn, "kurikulum");
    assign(&conn, sesi_id, ahmad);

    let entri = resolve_roster(&conn, sesi_id);

    assert_eq!(entri.len(), 1);
    assert_eq!(entri[0].peserta_id, ahmad);
    // The explicit assignment is what the admin sees, so it wins the flag
    assert!(entri[0].ditugaskan_manual);
}

#[test]
fn test_inactive_excluded_from_both_paths() {
    let (_dir, conn) = setup_test_db();

    create_peserta(&conn, "Ahmad", "ahmad", "peserta", "kurikulum", false);
    let bekas = create_peserta(&conn, "Bilal", "bilal", "peserta", "sarana", true);
    let aktif = create_peserta(&conn, "Citra", "citra", "peserta", "kurikulum", true);

    let sesi_id = sesi_dengan_target(&conn, "kurikulum");
    assign(&conn, sesi_id, bekas);

    // Bilal was assigned while active, then left the organisation
    conn.execute("UPDATE peserta SET aktif = 0 WHERE id = ?1", [bekas])
        .expect("Failed to deactivate");

    let entri = resolve_roster(&conn, sesi_id);

    assert_eq!(entri.len(), 1);
    assert_eq!(entri[0].peserta_id, aktif);
}

#[test]
fn test_multiple_target_bidang() {
    let (_dir, conn) = setup_test_db();

    create_peserta(&conn, "Ahmad", "ahmad", "peserta", "kurikulum", true);
    create_peserta(&conn, "Bilal", "bilal", "peserta", "keputrian", true);
    create_peserta(&conn, "Citra", "citra", "peserta", "sarana", true);

    let sesi_id = sesi_dengan_target(&conn, "kurikulum,keputrian");

    let entri = resolve_roster(&conn, sesi_id);

    assert_eq!(entri.len(), 2);
    assert!(entri.iter().all(|e| e.bidang != "sarana"));
}

#[test]
fn test_order_is_name_then_id() {
    let (_dir, conn) = setup_test_db();

    // Insert out of name order, including a duplicate name
    let citra = create_peserta(&conn, "Citra", "citra", "peserta", "kurikulum", true);
    let ahmad2 = create_peserta(&conn, "Ahmad", "ahmad2", "peserta", "kurikulum", true);
    let ahmad1 = create_peserta(&conn, "Ahmad", "ahmad1", "peserta", "kurikulum", true);

    let sesi_id = sesi_dengan_target(&conn, "kurikulum");

    let entri = resolve_roster(&conn, sesi_id);
    let ids: Vec<i64> = entri.iter().map(|e| e.peserta_id).collect();

    // Both Ahmads before Citra, tied names broken by id
    assert_eq!(ids, vec![ahmad2, ahmad1, citra]);
}

#[test]
fn test_no_rule_means_explicit_only() {
    let (_dir, conn) = setup_test_db();

    create_peserta(&conn, "Ahmad", "ahmad", "peserta", "kurikulum", true);
    let bilal = create_peserta(&conn, "Bilal", "bilal", "peserta", "sarana", true);

    let sesi_id = create_sesi(&conn, "Rapat Kecil", TEST_TANGGAL, "scheduled");
    assign(&conn, sesi_id, bilal);

    let entri = resolve_roster(&conn, sesi_id);

    assert_eq!(entri.len(), 1);
    assert_eq!(entri[0].peserta_id, bilal);
}

#[test]
fn test_empty_roster() {
    let (_dir, conn) = setup_test_db();

    let sesi_id = sesi_dengan_target(&conn, "bidang_tanpa_anggota");

    let entri = resolve_roster(&conn, sesi_id);
    assert!(entri.is_empty());
}
