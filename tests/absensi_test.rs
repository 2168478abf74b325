//! Attendance tests — covers stored records, the one-row-per-kind upsert,
//! and status resolution against the session roster.
//!
//! Tests the absensi model layer operations:
//! - Upsert semantics (a repeat submission replaces the previous one)
//! - Self submissions and admin overrides stored side by side
//! - Override precedence in the resolved report
//! - Ghoib default for roster members without any record
//! - Non-roster submissions reported separately, never counted

use ppg_admin::models::absensi::{self, SumberStatus};
use ppg_admin::models::sesi::{self, roster};
use ppg_admin::models::status::StatusKehadiran;

mod common;
use common::*;

const TEST_TANGGAL: &str = "2026-09-05";

fn laporan(conn: &rusqlite::Connection, sesi_id: i64) -> absensi::LaporanAbsensi {
    let sesi = sesi::find_by_id(conn, sesi_id)
        .expect("Query failed")
        .expect("Sesi not found");
    let daftar = roster::resolve(conn, &sesi).expect("Roster resolution failed");
    let records = absensi::find_by_sesi(conn, sesi_id).expect("Query failed");
    absensi::resolve(&daftar, &records)
}

#[test]
fn test_upsert_replaces_previous_submission() {
    let (_dir, conn) = setup_test_db();

    let sesi_id = create_sesi(&conn, "Musyawarah", TEST_TANGGAL, "active");
    let ahmad = create_peserta(&conn, "Ahmad", "ahmad", "peserta", "", true);

    absensi::upsert(&conn, sesi_id, ahmad, StatusKehadiran::Hadir, "", false, ahmad)
        .expect("First submission failed");
    absensi::upsert(&conn, sesi_id, ahmad, StatusKehadiran::Izin, "acara keluarga", false, ahmad)
        .expect("Second submission failed");

    let records = absensi::find_by_sesi(&conn, sesi_id).expect("Query failed");

    // Still one row of that kind, carrying the latest status
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, StatusKehadiran::Izin);
    assert_eq!(records[0].keterangan, "acara keluarga");
    assert!(!records[0].is_override);
}

#[test]
fn test_self_and_override_rows_coexist() {
    let (_dir, conn) = setup_test_db();

    let sesi_id = create_sesi(&conn, "Musyawarah", TEST_TANGGAL, "active");
    let ahmad = create_peserta(&conn, "Ahmad", "ahmad", "peserta", "", true);
    let admin = create_peserta(&conn, "Admin", "admin", "admin", "", true);

    absensi::upsert(&conn, sesi_id, ahmad, StatusKehadiran::Hadir, "", false, ahmad)
        .expect("Self submission failed");
    absensi::upsert(&conn, sesi_id, ahmad, StatusKehadiran::Sakit, "dirawat", true, admin)
        .expect("Override failed");

    let records = absensi::find_by_sesi(&conn, sesi_id).expect("Query failed");
    assert_eq!(records.len(), 2);
    assert_eq!(records.iter().filter(|r| r.is_override).count(), 1);
}

#[test]
fn test_override_wins_in_resolved_report() {
    let (_dir, conn) = setup_test_db();

    let sesi_id = create_sesi(&conn, "Musyawarah", TEST_TANGGAL, "active");
    let ahmad = create_peserta(&conn, "Ahmad", "ahmad", "peserta", "", true);
    let admin = create_peserta(&conn, "Admin", "admin", "admin", "", true);
    assign(&conn, sesi_id, ahmad);

    // Ahmad claims present, the admin corrects to ghoib
    absensi::upsert(&conn, sesi_id, ahmad, StatusKehadiran::Hadir, "", false, ahmad)
        .expect("Self submission failed");
    absensi::upsert(&conn, sesi_id, ahmad, StatusKehadiran::Ghoib, "tidak terlihat", true, admin)
        .expect("Override failed");

    let hasil = laporan(&conn, sesi_id);

    assert_eq!(hasil.entri.len(), 1);
    assert_eq!(hasil.entri[0].status, StatusKehadiran::Ghoib);
    assert_eq!(hasil.entri[0].sumber, SumberStatus::Override);
    assert_eq!(hasil.rekap.ghoib, 1);
    assert_eq!(hasil.rekap.hadir, 0);
}

#[test]
fn test_roster_member_without_record_defaults_to_ghoib() {
    let (_dir, conn) = setup_test_db();

    let sesi_id = create_sesi(&conn, "Musyawarah", TEST_TANGGAL, "completed");
    let ahmad = create_peserta(&conn, "Ahmad", "ahmad", "peserta", "", true);
    let bilal = create_peserta(&conn, "Bilal", "bilal", "peserta", "", true);
    assign(&conn, sesi_id, ahmad);
    assign(&conn, sesi_id, bilal);

    absensi::upsert(&conn, sesi_id, ahmad, StatusKehadiran::Hadir, "", false, ahmad)
        .expect("Submission failed");

    let hasil = laporan(&conn, sesi_id);

    assert_eq!(hasil.entri.len(), 2);
    let milik_bilal = hasil
        .entri
        .iter()
        .find(|e| e.peserta_id == bilal)
        .expect("Bilal missing from report");
    assert_eq!(milik_bilal.status, StatusKehadiran::Ghoib);
    assert_eq!(milik_bilal.sumber, SumberStatus::Default);
    assert_eq!(hasil.rekap.hadir, 1);
    assert_eq!(hasil.rekap.ghoib, 1);
    assert_eq!(hasil.rekap.total, 2);
}

#[test]
fn test_non_roster_submission_stays_out_of_stats() {
    let (_dir, conn) = setup_test_db();

    let sesi_id = create_sesi(&conn, "Musyawarah", TEST_TANGGAL, "active");
    let ahmad = create_peserta(&conn, "Ahmad", "ahmad", "peserta", "", true);
    let tamu = create_peserta(&conn, "Tamu", "tamu", "peserta", "", true);
    assign(&conn, sesi_id, ahmad);

    absensi::upsert(&conn, sesi_id, ahmad, StatusKehadiran::Hadir, "", false, ahmad)
        .expect("Submission failed");
    absensi::upsert(&conn, sesi_id, tamu, StatusKehadiran::Hadir, "", false, tamu)
        .expect("Guest submission failed");

    let hasil = laporan(&conn, sesi_id);

    assert_eq!(hasil.entri.len(), 1);
    assert_eq!(hasil.rekap.total, 1);
    assert_eq!(hasil.luar_daftar.len(), 1);
    assert_eq!(hasil.luar_daftar[0].peserta_id, tamu);
}

#[test]
fn test_rekap_counts_every_status() {
    let (_dir, conn) = setup_test_db();

    let sesi_id = create_sesi(&conn, "Musyawarah", TEST_TANGGAL, "completed");
    let statuses = [
        ("Ahmad", "a1", Some(StatusKehadiran::Hadir)),
        ("Bilal", "a2", Some(StatusKehadiran::Terlambat)),
        ("Citra", "a3", Some(StatusKehadiran::Izin)),
        ("Dewi", "a4", Some(StatusKehadiran::Sakit)),
        ("Eko", "a5", None),
    ];
    for (nama, username, status) in statuses {
        let id = create_peserta(&conn, nama, username, "peserta", "", true);
        assign(&conn, sesi_id, id);
        if let Some(st) = status {
            absensi::upsert(&conn, sesi_id, id, st, "", false, id)
                .expect("Submission failed");
        }
    }

    let hasil = laporan(&conn, sesi_id);

    assert_eq!(hasil.rekap.hadir, 1);
    assert_eq!(hasil.rekap.terlambat, 1);
    assert_eq!(hasil.rekap.izin, 1);
    assert_eq!(hasil.rekap.sakit, 1);
    assert_eq!(hasil.rekap.ghoib, 1);
    assert_eq!(hasil.rekap.total, 5);
}
