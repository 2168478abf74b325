use rusqlite::{params, Connection, ToSql};

use super::types::{LaporanKbm, NewLaporanKbm};

const SELECT_LAPORAN: &str = "\
    SELECT id, desa, kelompok, periode, kategori_program, jumlah_siswa, \
           jumlah_hadir, persentase_kehadiran, keterangan, created_at, updated_at \
    FROM laporan_kbm";

fn row_to_laporan(row: &rusqlite::Row) -> rusqlite::Result<LaporanKbm> {
    Ok(LaporanKbm {
        id: row.get("id")?,
        desa: row.get("desa")?,
        kelompok: row.get("kelompok")?,
        periode: row.get("periode")?,
        kategori_program: row.get("kategori_program")?,
        jumlah_siswa: row.get("jumlah_siswa")?,
        jumlah_hadir: row.get("jumlah_hadir")?,
        persentase_kehadiran: row.get("persentase_kehadiran")?,
        keterangan: row.get("keterangan")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// List reports, optionally narrowed by village and/or period.
pub fn find_all(
    conn: &Connection,
    desa: Option<&str>,
    periode: Option<&str>,
) -> rusqlite::Result<Vec<LaporanKbm>> {
    let mut clauses: Vec<String> = Vec::new();
    let mut bind: Vec<&dyn ToSql> = Vec::new();
    if let Some(d) = desa.as_ref() {
        clauses.push(format!("desa = ?{}", bind.len() + 1));
        bind.push(d);
    }
    if let Some(p) = periode.as_ref() {
        clauses.push(format!("periode = ?{}", bind.len() + 1));
        bind.push(p);
    }
    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    let sql =
        format!("{SELECT_LAPORAN}{where_clause} ORDER BY periode DESC, desa, kelompok, id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(&bind[..], row_to_laporan)?;
    rows.collect::<Result<Vec<_>, _>>()
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<LaporanKbm>> {
    let sql = format!("{SELECT_LAPORAN} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_laporan)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Insert a report. Re-submitting the same village, group, period and
/// category replaces the counts, so a corrected monthly report wins.
pub fn upsert(conn: &Connection, new: &NewLaporanKbm) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO laporan_kbm \
             (desa, kelompok, periode, kategori_program, jumlah_siswa, jumlah_hadir, \
              persentase_kehadiran, keterangan) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) \
         ON CONFLICT(desa, kelompok, periode, kategori_program) DO UPDATE SET \
             jumlah_siswa = excluded.jumlah_siswa, \
             jumlah_hadir = excluded.jumlah_hadir, \
             persentase_kehadiran = excluded.persentase_kehadiran, \
             keterangan = excluded.keterangan, \
             updated_at = datetime('now')",
        params![
            new.desa,
            new.kelompok,
            new.periode,
            new.kategori_program,
            new.jumlah_siswa,
            new.jumlah_hadir,
            new.persentase_kehadiran,
            new.keterangan,
        ],
    )?;
    let id: i64 = conn.query_row(
        "SELECT id FROM laporan_kbm \
         WHERE desa = ?1 AND kelompok = ?2 AND periode = ?3 AND kategori_program = ?4",
        params![new.desa, new.kelompok, new.periode, new.kategori_program],
        |row| row.get(0),
    )?;
    Ok(id)
}

pub fn update(conn: &Connection, id: i64, upd: &NewLaporanKbm) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE laporan_kbm \
         SET desa = ?1, kelompok = ?2, periode = ?3, kategori_program = ?4, \
             jumlah_siswa = ?5, jumlah_hadir = ?6, persentase_kehadiran = ?7, \
             keterangan = ?8, updated_at = datetime('now') \
         WHERE id = ?9",
        params![
            upd.desa,
            upd.kelompok,
            upd.periode,
            upd.kategori_program,
            upd.jumlah_siswa,
            upd.jumlah_hadir,
            upd.persentase_kehadiran,
            upd.keterangan,
            id,
        ],
    )?;
    Ok(affected > 0)
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let affected = conn.execute("DELETE FROM laporan_kbm WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}
