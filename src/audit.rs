//! Mutation audit trail. Writes are best-effort: call sites ignore the
//! result so a logging failure never aborts the user's action.

use std::time::Duration;

use rusqlite::{Connection, params};
use serde::Serialize;
use serde_json::Value;

use crate::db::DbPool;

#[derive(Debug, Clone, Serialize)]
pub struct AuditEntry {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub target_type: String,
    pub target_id: i64,
    pub details: String,
    pub created_at: String,
}

/// Record one mutating action against its target.
pub fn log(
    conn: &Connection,
    user_id: i64,
    action: &str,
    target_type: &str,
    target_id: i64,
    details: Value,
) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO audit_log (user_id, action, target_type, target_id, details) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, action, target_type, target_id, details.to_string()],
    )?;
    Ok(())
}

/// Most recent entries, newest first, for the dashboard.
pub fn find_recent(conn: &Connection, limit: i64) -> rusqlite::Result<Vec<AuditEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, action, target_type, target_id, details, created_at \
         FROM audit_log ORDER BY id DESC LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(AuditEntry {
            id: row.get(0)?,
            user_id: row.get(1)?,
            action: row.get(2)?,
            target_type: row.get(3)?,
            target_id: row.get(4)?,
            details: row.get(5)?,
            created_at: row.get(6)?,
        })
    })?;
    rows.collect()
}

/// Delete entries older than the retention window (days).
pub fn cleanup_old_entries(conn: &Connection, retention_days: i64) {
    let result = conn.execute(
        "DELETE FROM audit_log WHERE created_at < datetime('now', ?1)",
        params![format!("-{retention_days} days")],
    );
    match result {
        Ok(n) if n > 0 => log::info!("Audit cleanup removed {n} old entries"),
        Ok(_) => {}
        Err(e) => log::warn!("Audit cleanup failed: {e}"),
    }
}

/// Background sweep that trims the trail once a day. The first tick
/// fires immediately, which doubles as the startup cleanup.
pub fn spawn_retention_sweep(pool: DbPool, retention_days: i64) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(24 * 60 * 60));
        loop {
            interval.tick().await;
            let conn = match pool.get() {
                Ok(c) => c,
                Err(e) => {
                    log::error!("Retention sweep: failed to get DB connection: {}", e);
                    continue;
                }
            };
            cleanup_old_entries(&conn, retention_days);
        }
    });
}
