use rusqlite::{params, Connection};

use super::types::{NewSesi, Sesi, SesiDisplay};
use crate::models::status::StatusSesi;

const SELECT_SESI: &str = "\
    SELECT id, nama, deskripsi, tanggal, waktu_mulai, waktu_selesai, lokasi, \
           kapasitas, target_bidang, status, created_at, updated_at \
    FROM sesi";

// Listing carries the assignment count so the roster screen can show
// occupancy without a second round trip.
const SELECT_DISPLAY: &str = "\
    SELECT s.id, s.nama, s.deskripsi, s.tanggal, s.waktu_mulai, s.waktu_selesai, \
           s.lokasi, s.kapasitas, s.target_bidang, s.status, s.created_at, s.updated_at, \
           (SELECT COUNT(*) FROM sesi_peserta sp WHERE sp.sesi_id = s.id) AS jumlah_ditugaskan \
    FROM sesi s";

fn parse_status(raw: &str) -> StatusSesi {
    StatusSesi::from_str(raw).unwrap_or(StatusSesi::Scheduled)
}

fn row_to_sesi(row: &rusqlite::Row) -> rusqlite::Result<Sesi> {
    Ok(Sesi {
        id: row.get("id")?,
        nama: row.get("nama")?,
        deskripsi: row.get("deskripsi")?,
        tanggal: row.get("tanggal")?,
        waktu_mulai: row.get("waktu_mulai")?,
        waktu_selesai: row.get("waktu_selesai")?,
        lokasi: row.get("lokasi")?,
        kapasitas: row.get("kapasitas")?,
        target_bidang: row.get("target_bidang")?,
        status: parse_status(&row.get::<_, String>("status")?),
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn row_to_display(row: &rusqlite::Row) -> rusqlite::Result<SesiDisplay> {
    let status = parse_status(&row.get::<_, String>("status")?);
    Ok(SesiDisplay {
        id: row.get("id")?,
        nama: row.get("nama")?,
        deskripsi: row.get("deskripsi")?,
        tanggal: row.get("tanggal")?,
        waktu_mulai: row.get("waktu_mulai")?,
        waktu_selesai: row.get("waktu_selesai")?,
        lokasi: row.get("lokasi")?,
        kapasitas: row.get("kapasitas")?,
        target_bidang: row.get("target_bidang")?,
        status,
        status_label: status.label().to_string(),
        jumlah_ditugaskan: row.get("jumlah_ditugaskan")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// List sessions newest first, optionally filtered by status.
pub fn find_all(
    conn: &Connection,
    status: Option<StatusSesi>,
) -> rusqlite::Result<Vec<SesiDisplay>> {
    let order = " ORDER BY s.tanggal DESC, s.waktu_mulai DESC, s.id DESC";
    match status {
        Some(st) => {
            let sql = format!("{SELECT_DISPLAY} WHERE s.status = ?1{order}");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![st.as_str()], row_to_display)?;
            rows.collect::<Result<Vec<_>, _>>()
        }
        None => {
            let sql = format!("{SELECT_DISPLAY}{order}");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], row_to_display)?;
            rows.collect::<Result<Vec<_>, _>>()
        }
    }
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Sesi>> {
    let sql = format!("{SELECT_SESI} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_sesi)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_display_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<SesiDisplay>> {
    let sql = format!("{SELECT_DISPLAY} WHERE s.id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_display)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn create(conn: &Connection, new: &NewSesi) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO sesi (nama, deskripsi, tanggal, waktu_mulai, waktu_selesai, \
                           lokasi, kapasitas, target_bidang) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            new.nama,
            new.deskripsi,
            new.tanggal,
            new.waktu_mulai,
            new.waktu_selesai,
            new.lokasi,
            new.kapasitas,
            new.target_bidang,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Edit the schedule fields. Target fields are managed separately so an
/// ordinary edit never clears the auto-assignment rule.
pub fn update(conn: &Connection, id: i64, upd: &NewSesi) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE sesi \
         SET nama = ?1, deskripsi = ?2, tanggal = ?3, waktu_mulai = ?4, \
             waktu_selesai = ?5, lokasi = ?6, kapasitas = ?7, \
             updated_at = datetime('now') \
         WHERE id = ?8",
        params![
            upd.nama,
            upd.deskripsi,
            upd.tanggal,
            upd.waktu_mulai,
            upd.waktu_selesai,
            upd.lokasi,
            upd.kapasitas,
            id,
        ],
    )?;
    Ok(affected > 0)
}

pub fn set_target_bidang(conn: &Connection, id: i64, target: &str) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE sesi SET target_bidang = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![target, id],
    )?;
    Ok(affected > 0)
}

pub fn update_status(conn: &Connection, id: i64, status: StatusSesi) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE sesi SET status = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![status.as_str(), id],
    )?;
    Ok(affected > 0)
}

/// Explicit roster assignment. Idempotent, re-assigning is a no-op.
pub fn assign_peserta(conn: &Connection, sesi_id: i64, peserta_id: i64) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "INSERT OR IGNORE INTO sesi_peserta (sesi_id, peserta_id) VALUES (?1, ?2)",
        params![sesi_id, peserta_id],
    )?;
    Ok(affected > 0)
}

pub fn unassign_peserta(
    conn: &Connection,
    sesi_id: i64,
    peserta_id: i64,
) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "DELETE FROM sesi_peserta WHERE sesi_id = ?1 AND peserta_id = ?2",
        params![sesi_id, peserta_id],
    )?;
    Ok(affected > 0)
}

pub fn is_assigned(conn: &Connection, sesi_id: i64, peserta_id: i64) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sesi_peserta WHERE sesi_id = ?1 AND peserta_id = ?2",
        params![sesi_id, peserta_id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn count_by_status(conn: &Connection, status: StatusSesi) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM sesi WHERE status = ?1",
        params![status.as_str()],
        |row| row.get(0),
    )
}

pub fn count_on_date(conn: &Connection, tanggal: &str) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM sesi WHERE tanggal = ?1 AND status != 'cancelled'",
        params![tanggal],
        |row| row.get(0),
    )
}
