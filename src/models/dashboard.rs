//! Landing-page summary counts and recent activity.

use rusqlite::Connection;
use serde::Serialize;

use crate::audit::{self, AuditEntry};
use crate::models::status::{StatusNotulensi, StatusSesi};
use crate::models::{notulensi, peserta, program_kerja, sesi};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub peserta_aktif: i64,
    pub sesi_hari_ini: i64,
    pub sesi_terjadwal: i64,
    pub notulensi_menunggu: i64,
    pub kegiatan_tahun_ini: i64,
    pub aktivitas_terakhir: Vec<AuditEntry>,
}

pub fn summarize(conn: &Connection, hari_ini: &str, tahun_ini: i64) -> rusqlite::Result<DashboardSummary> {
    Ok(DashboardSummary {
        peserta_aktif: peserta::count_aktif(conn)?,
        sesi_hari_ini: sesi::count_on_date(conn, hari_ini)?,
        sesi_terjadwal: sesi::count_by_status(conn, StatusSesi::Scheduled)?,
        notulensi_menunggu: notulensi::count_by_status(conn, StatusNotulensi::PendingApproval)?,
        kegiatan_tahun_ini: program_kerja::count_kegiatan_tahun(conn, tahun_ini)?,
        aktivitas_terakhir: audit::find_recent(conn, 10)?,
    })
}
