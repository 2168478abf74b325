use rusqlite::{params, Connection};

use super::types::AbsensiRecord;
use crate::models::status::StatusKehadiran;

/// All attendance rows for a session, both kinds, joined with names.
pub fn find_by_sesi(conn: &Connection, sesi_id: i64) -> rusqlite::Result<Vec<AbsensiRecord>> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.sesi_id, a.peserta_id, p.nama, a.status, a.keterangan, \
                a.is_override, a.dicatat_oleh, a.updated_at \
         FROM absensi a \
         JOIN peserta p ON p.id = a.peserta_id \
         WHERE a.sesi_id = ?1 \
         ORDER BY a.id",
    )?;
    let rows = stmt.query_map(params![sesi_id], |row| {
        let raw: String = row.get("status")?;
        Ok(AbsensiRecord {
            id: row.get("id")?,
            sesi_id: row.get("sesi_id")?,
            peserta_id: row.get("peserta_id")?,
            nama: row.get("nama")?,
            status: StatusKehadiran::from_str(&raw).unwrap_or(StatusKehadiran::Ghoib),
            keterangan: row.get("keterangan")?,
            is_override: row.get::<_, i64>("is_override")? != 0,
            dicatat_oleh: row.get("dicatat_oleh")?,
            updated_at: row.get("updated_at")?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>()
}

/// Write one attendance record. One row per participant and kind;
/// a repeat submission replaces the previous one (last write wins).
pub fn upsert(
    conn: &Connection,
    sesi_id: i64,
    peserta_id: i64,
    status: StatusKehadiran,
    keterangan: &str,
    is_override: bool,
    dicatat_oleh: i64,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO absensi (sesi_id, peserta_id, status, keterangan, is_override, dicatat_oleh) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
         ON CONFLICT(sesi_id, peserta_id, is_override) DO UPDATE SET \
             status = excluded.status, \
             keterangan = excluded.keterangan, \
             dicatat_oleh = excluded.dicatat_oleh, \
             updated_at = datetime('now')",
        params![
            sesi_id,
            peserta_id,
            status.as_str(),
            keterangan,
            is_override as i64,
            dicatat_oleh,
        ],
    )?;
    Ok(())
}

