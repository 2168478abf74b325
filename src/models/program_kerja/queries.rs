use rusqlite::{params, Connection};

use super::types::{Kegiatan, NewKegiatan, NewRincian, RincianBiaya};

const SELECT_KEGIATAN: &str = "\
    SELECT id, tahun, bidang, bulan, nama, tujuan, created_at, updated_at \
    FROM kegiatan";

const SELECT_RINCIAN: &str = "\
    SELECT id, kegiatan_id, nama_item, jumlah, harga_satuan, hari, frekuensi, \
           created_at, updated_at \
    FROM rincian_biaya";

fn row_to_kegiatan(row: &rusqlite::Row) -> rusqlite::Result<Kegiatan> {
    Ok(Kegiatan {
        id: row.get("id")?,
        tahun: row.get("tahun")?,
        bidang: row.get("bidang")?,
        bulan: row.get("bulan")?,
        nama: row.get("nama")?,
        tujuan: row.get("tujuan")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

fn row_to_rincian(row: &rusqlite::Row) -> rusqlite::Result<RincianBiaya> {
    Ok(RincianBiaya {
        id: row.get("id")?,
        kegiatan_id: row.get("kegiatan_id")?,
        nama_item: row.get("nama_item")?,
        jumlah: row.get("jumlah")?,
        harga_satuan: row.get("harga_satuan")?,
        hari: row.get("hari")?,
        frekuensi: row.get("frekuensi")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Activities for a program year, optionally one field only.
/// Ordered by month, then field, then name, the order the printed
/// program book uses.
pub fn find_kegiatan(
    conn: &Connection,
    tahun: i64,
    bidang: Option<&str>,
) -> rusqlite::Result<Vec<Kegiatan>> {
    let order = " ORDER BY bulan, bidang, nama, id";
    match bidang {
        Some(b) => {
            let sql = format!("{SELECT_KEGIATAN} WHERE tahun = ?1 AND bidang = ?2{order}");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![tahun, b], row_to_kegiatan)?;
            rows.collect::<Result<Vec<_>, _>>()
        }
        None => {
            let sql = format!("{SELECT_KEGIATAN} WHERE tahun = ?1{order}");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![tahun], row_to_kegiatan)?;
            rows.collect::<Result<Vec<_>, _>>()
        }
    }
}

pub fn find_kegiatan_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<Kegiatan>> {
    let sql = format!("{SELECT_KEGIATAN} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_kegiatan)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn create_kegiatan(conn: &Connection, new: &NewKegiatan) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO kegiatan (tahun, bidang, bulan, nama, tujuan) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![new.tahun, new.bidang, new.bulan, new.nama, new.tujuan],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_kegiatan(conn: &Connection, id: i64, upd: &NewKegiatan) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE kegiatan \
         SET tahun = ?1, bidang = ?2, bulan = ?3, nama = ?4, tujuan = ?5, \
             updated_at = datetime('now') \
         WHERE id = ?6",
        params![upd.tahun, upd.bidang, upd.bulan, upd.nama, upd.tujuan, id],
    )?;
    Ok(affected > 0)
}

/// Hard delete. Cost lines go with it via the cascade.
pub fn delete_kegiatan(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let affected = conn.execute("DELETE FROM kegiatan WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

pub fn find_rincian_by_kegiatan(
    conn: &Connection,
    kegiatan_id: i64,
) -> rusqlite::Result<Vec<RincianBiaya>> {
    let sql = format!("{SELECT_RINCIAN} WHERE kegiatan_id = ?1 ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![kegiatan_id], row_to_rincian)?;
    rows.collect::<Result<Vec<_>, _>>()
}

pub fn find_rincian_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<RincianBiaya>> {
    let sql = format!("{SELECT_RINCIAN} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_rincian)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn create_rincian(
    conn: &Connection,
    kegiatan_id: i64,
    new: &NewRincian,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO rincian_biaya (kegiatan_id, nama_item, jumlah, harga_satuan, hari, frekuensi) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            kegiatan_id,
            new.nama_item,
            new.jumlah,
            new.harga_satuan,
            new.hari,
            new.frekuensi,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_rincian(conn: &Connection, id: i64, upd: &NewRincian) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE rincian_biaya \
         SET nama_item = ?1, jumlah = ?2, harga_satuan = ?3, hari = ?4, frekuensi = ?5, \
             updated_at = datetime('now') \
         WHERE id = ?6",
        params![upd.nama_item, upd.jumlah, upd.harga_satuan, upd.hari, upd.frekuensi, id],
    )?;
    Ok(affected > 0)
}

pub fn delete_rincian(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let affected = conn.execute("DELETE FROM rincian_biaya WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

/// Activities for a year with their cost lines, the rollup input.
pub fn find_kegiatan_with_rincian(
    conn: &Connection,
    tahun: i64,
    bidang: Option<&str>,
) -> rusqlite::Result<Vec<(Kegiatan, Vec<RincianBiaya>)>> {
    let kegiatan = find_kegiatan(conn, tahun, bidang)?;
    let mut result = Vec::with_capacity(kegiatan.len());
    for keg in kegiatan {
        let rincian = find_rincian_by_kegiatan(conn, keg.id)?;
        result.push((keg, rincian));
    }
    Ok(result)
}

pub fn count_kegiatan_tahun(conn: &Connection, tahun: i64) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM kegiatan WHERE tahun = ?1",
        params![tahun],
        |row| row.get(0),
    )
}
