//! Shared test infrastructure for model layer tests.
//!
//! This module provides common utilities for setting up test databases
//! and seeding the rows most suites need (participants, sessions,
//! activities).

use rusqlite::{params, Connection};
use tempfile::TempDir;

use ppg_admin::db::MIGRATIONS;

// ============================================================================
// DATABASE SETUP
// ============================================================================

/// Setup a test database with the full schema applied.
///
/// Creates a temporary SQLite database and runs migrations. Each test
/// gets its own file so suites can run in parallel.
///
/// Returns a tuple of (TempDir, Connection) where TempDir must be kept
/// alive for the Connection to remain valid.
pub fn setup_test_db() -> (TempDir, Connection) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");
    let conn = rusqlite::Connection::open(&db_path).expect("Failed to open test DB");

    conn.execute_batch("PRAGMA foreign_keys=ON; PRAGMA journal_mode=WAL;")
        .expect("Failed to set pragmas");

    conn.execute_batch(MIGRATIONS)
        .expect("Failed to run migrations");

    (dir, conn)
}

// ============================================================================
// SEED HELPERS
// ============================================================================

/// Insert a participant row and return its id. The password column gets
/// a placeholder; suites that exercise login hash their own.
pub fn create_peserta(
    conn: &Connection,
    nama: &str,
    username: &str,
    role: &str,
    bidang: &str,
    aktif: bool,
) -> i64 {
    conn.execute(
        "INSERT INTO peserta (nama, username, password, role, bidang, aktif) \
         VALUES (?1, ?2, 'x', ?3, ?4, ?5)",
        params![nama, username, role, bidang, aktif as i64],
    )
    .expect("Failed to insert peserta");
    conn.last_insert_rowid()
}

/// Insert a session row and return its id.
pub fn create_sesi(conn: &Connection, nama: &str, tanggal: &str, status: &str) -> i64 {
    conn.execute(
        "INSERT INTO sesi (nama, deskripsi, tanggal, waktu_mulai, waktu_selesai, lokasi, status) \
         VALUES (?1, '', ?2, '19:30', '21:30', 'Masjid Baitul Makmur', ?3)",
        params![nama, tanggal, status],
    )
    .expect("Failed to insert sesi");
    conn.last_insert_rowid()
}

/// Put a participant on a session's explicit assignment list.
pub fn assign(conn: &Connection, sesi_id: i64, peserta_id: i64) {
    conn.execute(
        "INSERT INTO sesi_peserta (sesi_id, peserta_id) VALUES (?1, ?2)",
        params![sesi_id, peserta_id],
    )
    .expect("Failed to assign peserta");
}

/// Insert a work program activity and return its id.
pub fn create_kegiatan(conn: &Connection, tahun: i64, bidang: &str, bulan: i64, nama: &str) -> i64 {
    conn.execute(
        "INSERT INTO kegiatan (tahun, bidang, bulan, nama, tujuan) \
         VALUES (?1, ?2, ?3, ?4, '')",
        params![tahun, bidang, bulan, nama],
    )
    .expect("Failed to insert kegiatan");
    conn.last_insert_rowid()
}

/// Insert a cost line under an activity and return its id.
pub fn create_rincian(
    conn: &Connection,
    kegiatan_id: i64,
    nama_item: &str,
    jumlah: i64,
    harga_satuan: i64,
    hari: i64,
    frekuensi: i64,
) -> i64 {
    conn.execute(
        "INSERT INTO rincian_biaya (kegiatan_id, nama_item, jumlah, harga_satuan, hari, frekuensi) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![kegiatan_id, nama_item, jumlah, harga_satuan, hari, frekuensi],
    )
    .expect("Failed to insert rincian");
    conn.last_insert_rowid()
}
