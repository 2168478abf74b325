//! Catalogue of externally hosted documents. The app stores metadata
//! and the URL only, never file bytes.

use rusqlite::{params, Connection};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct FileLink {
    pub id: i64,
    pub judul: String,
    pub url: String,
    pub kategori: String,
    pub deskripsi: String,
    pub dibuat_oleh: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug)]
pub struct NewFileLink {
    pub judul: String,
    pub url: String,
    pub kategori: String,
    pub deskripsi: String,
}

const SELECT_LINK: &str = "\
    SELECT id, judul, url, kategori, deskripsi, dibuat_oleh, created_at, updated_at \
    FROM file_link";

fn row_to_link(row: &rusqlite::Row) -> rusqlite::Result<FileLink> {
    Ok(FileLink {
        id: row.get("id")?,
        judul: row.get("judul")?,
        url: row.get("url")?,
        kategori: row.get("kategori")?,
        deskripsi: row.get("deskripsi")?,
        dibuat_oleh: row.get("dibuat_oleh")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn find_all(conn: &Connection, kategori: Option<&str>) -> rusqlite::Result<Vec<FileLink>> {
    let order = " ORDER BY judul, id";
    match kategori {
        Some(k) => {
            let sql = format!("{SELECT_LINK} WHERE kategori = ?1{order}");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map(params![k], row_to_link)?;
            rows.collect::<Result<Vec<_>, _>>()
        }
        None => {
            let sql = format!("{SELECT_LINK}{order}");
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt.query_map([], row_to_link)?;
            rows.collect::<Result<Vec<_>, _>>()
        }
    }
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<FileLink>> {
    let sql = format!("{SELECT_LINK} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_link)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn create(conn: &Connection, new: &NewFileLink, dibuat_oleh: i64) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO file_link (judul, url, kategori, deskripsi, dibuat_oleh) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![new.judul, new.url, new.kategori, new.deskripsi, dibuat_oleh],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, upd: &NewFileLink) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE file_link \
         SET judul = ?1, url = ?2, kategori = ?3, deskripsi = ?4, updated_at = datetime('now') \
         WHERE id = ?5",
        params![upd.judul, upd.url, upd.kategori, upd.deskripsi, id],
    )?;
    Ok(affected > 0)
}

pub fn delete(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let affected = conn.execute("DELETE FROM file_link WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}
