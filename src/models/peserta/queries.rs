use rusqlite::{params, Connection};

use super::types::{NewPeserta, Peserta, PesertaDisplay, PesertaUpdate};
use crate::models::status::Role;

const SELECT_DISPLAY: &str = "\
    SELECT id, nama, username, role, bidang, aktif, created_at, updated_at \
    FROM peserta";

fn parse_role(raw: &str) -> Role {
    Role::from_str(raw).unwrap_or(Role::Peserta)
}

fn row_to_display(row: &rusqlite::Row) -> rusqlite::Result<PesertaDisplay> {
    let role = parse_role(&row.get::<_, String>("role")?);
    Ok(PesertaDisplay {
        id: row.get("id")?,
        nama: row.get("nama")?,
        username: row.get("username")?,
        role,
        role_label: role.label().to_string(),
        bidang: row.get("bidang")?,
        aktif: row.get::<_, i64>("aktif")? != 0,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// List participants, optionally filtered by field and active flag.
pub fn find_all(
    conn: &Connection,
    bidang: Option<&str>,
    hanya_aktif: bool,
) -> rusqlite::Result<Vec<PesertaDisplay>> {
    let mut clauses: Vec<&str> = Vec::new();
    if bidang.is_some() {
        clauses.push("bidang = ?1");
    }
    if hanya_aktif {
        clauses.push("aktif = 1");
    }
    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    let sql = format!("{SELECT_DISPLAY}{where_clause} ORDER BY nama, id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = match bidang {
        Some(b) => stmt.query_map(params![b], row_to_display)?,
        None => stmt.query_map([], row_to_display)?,
    };
    rows.collect::<Result<Vec<_>, _>>()
}

pub fn find_display_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<PesertaDisplay>> {
    let sql = format!("{SELECT_DISPLAY} WHERE id = ?1");
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query_map(params![id], row_to_display)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Find a participant by username for login. Includes the password hash.
pub fn find_by_username(conn: &Connection, username: &str) -> rusqlite::Result<Option<Peserta>> {
    let mut stmt = conn.prepare(
        "SELECT id, nama, username, password, role, bidang, aktif, created_at, updated_at \
         FROM peserta WHERE username = ?1",
    )?;
    let mut rows = stmt.query_map(params![username], |row| {
        Ok(Peserta {
            id: row.get("id")?,
            nama: row.get("nama")?,
            username: row.get("username")?,
            password: row.get("password")?,
            role: parse_role(&row.get::<_, String>("role")?),
            bidang: row.get("bidang")?,
            aktif: row.get::<_, i64>("aktif")? != 0,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    })?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn username_exists(conn: &Connection, username: &str) -> rusqlite::Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM peserta WHERE username = ?1",
        params![username],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

pub fn create(conn: &Connection, new: &NewPeserta) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO peserta (nama, username, password, role, bidang) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![new.nama, new.username, new.password, new.role.as_str(), new.bidang],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Apply an edit. Returns false when the id does not exist.
pub fn update(conn: &Connection, id: i64, upd: &PesertaUpdate) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE peserta \
         SET nama = ?1, role = ?2, bidang = ?3, aktif = ?4, updated_at = datetime('now') \
         WHERE id = ?5",
        params![upd.nama, upd.role.as_str(), upd.bidang, upd.aktif as i64, id],
    )?;
    Ok(affected > 0)
}

pub fn update_password(conn: &Connection, id: i64, password_hash: &str) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE peserta SET password = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![password_hash, id],
    )?;
    Ok(affected > 0)
}

/// Soft delete. The row stays for history, roster resolution skips it.
pub fn deactivate(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let affected = conn.execute(
        "UPDATE peserta SET aktif = 0, updated_at = datetime('now') WHERE id = ?1",
        params![id],
    )?;
    Ok(affected > 0)
}

pub fn count_aktif(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM peserta WHERE aktif = 1", [], |row| {
        row.get(0)
    })
}
