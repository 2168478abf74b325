use rusqlite::{params, Connection};

use super::types::{NewNotulensi, Notulensi, NotulensiDisplay};
use crate::models::status::StatusNotulensi;

const SELECT_DISPLAY: &str = "\
    SELECT n.id, n.sesi_id, s.nama AS sesi_nama, n.judul, n.isi, n.status, \
           n.version, n.dibuat_oleh, COALESCE(p.nama, '') AS dibuat_oleh_nama, \
           n.catatan_reviewer, n.created_at, n.updated_at \
    FROM notulensi n \
    JOIN sesi s ON s.id = n.sesi_id \
    LEFT JOIN peserta p ON p.id = n.dibuat_oleh";

fn parse_status(raw: &str) -> StatusNotulensi {
    StatusNotulensi::from_str(raw).unwrap_or(StatusNotulensi::Draft)
}

fn row_to_display(row: &rusqlite::Row) -> rusqlite::Result<NotulensiDisplay> {
    let status = parse_status(&row.get::<_, String>("status")?);
    Ok(NotulensiDisplay {
        id: row.get("id")?,
        sesi_id: row.get("sesi_id")?,
        sesi_nama: row.get("sesi_nama")?,
        judul: row.get("judul")?,
        isi: row.get("isi")?,
        status,
        status_label: status.label().to_string(),
        version: row.get("version")?,
        dibuat_oleh: row.get("dibuat_oleh")?,
        dibuat_oleh_nama: row.get("dibuat_oleh_nama")?,
        catatan_reviewer: row.get("catatan_reviewer")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn row_to_notulensi(row: &rusqlite::Row) -> rusqlite::Result<Notulensi> {
    Ok(Notulensi {
        id: row.get("id")?,
        sesi_id: row.get("sesi_id")?,
        judul: row.get("judul")?,
        isi: row.get("isi")?,
        status: parse_status(&row.get::<_, String>("status")?),
        version: row.get("version")?,
        dibuat_oleh: row.get("dibuat_oleh")?,
        catatan_reviewer: row.get("catatan_reviewer")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// List minutes newest first, optionally filtered by workflow status.
pub fn find_all(
    conn: &Connection,
    status: Option<StatusNotulensi>,
) -> rusqlite::Result<Vec<NotulensiDisplay>> {
    let order = " ORDER BY n.id DESC";
    match status {
        Some(st) => {
            let sql = format!("{SELECT_DISPLAY} WHERE n.status = ?1{order}");
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

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Notulensi>> {
    let mut stmt = conn.prepare(
        "SELECT id, sesi_id, judul, isi, status, version, dibuat_oleh, \
                catatan_reviewer, created_at, updated_at \
         FROM notulensi WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map(params![id], row_to_notulensi)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_display_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<NotulensiDisplay>> {
    let sql = format!("{SELECT_DISPLAY} WHERE n.id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_display)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Each session carries at most one minutes document.
pub fn find_by_sesi(conn: &Connection, sesi_id: i64) -> rusqlite::Result<Option<NotulensiDisplay>> {
    let sql = format!("{SELECT_DISPLAY} WHERE n.sesi_id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![sesi_id], row_to_display)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn create(conn: &Connection, new: &NewNotulensi) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO notulensi (sesi_id, judul, isi, dibuat_oleh) VALUES (?1, ?2, ?3, ?4)",
        params![new.sesi_id, new.judul, new.isi, new.dibuat_oleh],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Content edit guarded by the version the editor loaded. Returns false
/// when someone else saved in between; the caller reports the conflict.
pub fn update_content(
    conn: &Connection,
    id: i64,
    judul: &str,
    isi: &str,
    expected_version: i64,
) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE notulensi \
         SET judul = ?1, isi = ?2, version = version + 1, updated_at = datetime('now') \
         WHERE id = ?3 AND version = ?4",
        params![judul, isi, id, expected_version],
    )?;
    Ok(affected > 0)
}

pub fn update_status(
    conn: &Connection,
    id: i64,
    status: StatusNotulensi,
    catatan_reviewer: &str,
) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE notulensi \
         SET status = ?1, catatan_reviewer = ?2, updated_at = datetime('now') \
         WHERE id = ?3",
        params![status.as_str(), catatan_reviewer, id],
    )?;
    Ok(affected > 0)
}

pub fn count_by_status(conn: &Connection, status: StatusNotulensi) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM notulensi WHERE status = ?1",
        params![status.as_str()],
        |row| row.get(0),
    )
}
