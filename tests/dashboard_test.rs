//! Dashboard and audit trail tests — covers the landing-page summary
//! counts, the recent-activity feed, and audit retention cleanup.

use ppg_admin::audit;
use ppg_admin::models::dashboard;
use ppg_admin::models::notulensi::{self, NewNotulensi};
use ppg_admin::models::status::StatusNotulensi;
use serde_json::json;

mod common;
use common::*;

const HARI_INI: &str = "2026-08-24";
const TAHUN_INI: i64 = 2026;

#[test]
fn test_audit_log_and_find_recent() {
    let (_dir, conn) = setup_test_db();

    let admin = create_peserta(&conn, "Admin", "admin", "admin", "", true);
    for i in 1..=3 {
        audit::log(&conn, admin, "sesi.created", "sesi", i, json!({"nama": format!("Sesi {i}")}))
            .expect("Failed to log");
    }

    let recent = audit::find_recent(&conn, 2).expect("Query failed");

    // Newest first, capped at the limit
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].target_id, 3);
    assert_eq!(recent[1].target_id, 2);
    assert_eq!(recent[0].action, "sesi.created");
    assert!(recent[0].details.contains("Sesi 3"));
}

#[test]
fn test_audit_cleanup_drops_only_old_entries() {
    let (_dir, conn) = setup_test_db();

    let admin = create_peserta(&conn, "Admin", "admin", "admin", "", true);
    audit::log(&conn, admin, "peserta.created", "peserta", 1, json!({}))
        .expect("Failed to log");

    // Backdate one entry beyond the retention window
    conn.execute(
        "INSERT INTO audit_log (user_id, action, target_type, target_id, details, created_at) \
         VALUES (?1, 'peserta.created', 'peserta', 2, '{}', datetime('now', '-400 days'))",
        [admin],
    )
    .expect("Failed to insert old entry");

    audit::cleanup_old_entries(&conn, 365);

    let recent = audit::find_recent(&conn, 10).expect("Query failed");
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].target_id, 1);
}

#[test]
fn test_summary_counts() {
    let (_dir, conn) = setup_test_db();

    // Two active participants, one inactive
    let siti = create_peserta(&conn, "Siti", "siti", "pengurus", "kurikulum", true);
    create_peserta(&conn, "Ahmad", "ahmad", "peserta", "", true);
    create_peserta(&conn, "Bekas", "bekas", "peserta", "", false);

    // One session today (cancelled ones do not count), one scheduled later
    create_sesi(&conn, "Musyawarah Pagi", HARI_INI, "active");
    create_sesi(&conn, "Batal", HARI_INI, "cancelled");
    create_sesi(&conn, "Musyawarah Depan", "2026-09-05", "scheduled");

    // One minutes document waiting for review
    let selesai = create_sesi(&conn, "Sudah Lewat", "2026-08-01", "completed");
    let notulensi_id = notulensi::create(
        &conn,
        &NewNotulensi {
            sesi_id: selesai,
            judul: "Notulen Agustus".to_string(),
            isi: String::new(),
            dibuat_oleh: siti,
        },
    )
    .expect("Failed to create notulensi");
    notulensi::update_status(&conn, notulensi_id, StatusNotulensi::PendingApproval, "")
        .expect("Submit failed");

    // Two activities this year, one last year
    create_kegiatan(&conn, TAHUN_INI, "kurikulum", 3, "Penataran");
    create_kegiatan(&conn, TAHUN_INI, "sarana", 6, "Pengadaan");
    create_kegiatan(&conn, TAHUN_INI - 1, "sarana", 6, "Lama");

    audit::log(&conn, siti, "notulensi.submitted", "notulensi", notulensi_id, json!({}))
        .expect("Failed to log");

    let ringkasan = dashboard::summarize(&conn, HARI_INI, TAHUN_INI)
        .expect("Summary failed");

    assert_eq!(ringkasan.peserta_aktif, 2);
    assert_eq!(ringkasan.sesi_hari_ini, 1);
    assert_eq!(ringkasan.sesi_terjadwal, 1);
    assert_eq!(ringkasan.notulensi_menunggu, 1);
    assert_eq!(ringkasan.kegiatan_tahun_ini, 2);
    assert_eq!(ringkasan.aktivitas_terakhir.len(), 1);
    assert_eq!(ringkasan.aktivitas_terakhir[0].action, "notulensi.submitted");
}

#[test]
fn test_summary_on_empty_database() {
    let (_dir, conn) = setup_test_db();

    let ringkasan = dashboard::summarize(&conn, HARI_INI, TAHUN_INI)
        .expect("Summary failed");

    assert_eq!(ringkasan.peserta_aktif, 0);
    assert_eq!(ringkasan.sesi_hari_ini, 0);
    assert_eq!(ringkasan.notulensi_menunggu, 0);
    assert!(ringkasan.aktivitas_terakhir.is_empty());
}
