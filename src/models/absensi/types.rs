use serde::Serialize;

use crate::models::status::StatusKehadiran;

/// One stored attendance row, joined with the participant name.
/// Self submissions and admin overrides live in the same table,
/// separated by `is_override`.
#[derive(Debug, Clone, Serialize)]
pub struct AbsensiRecord {
    pub id: i64,
    pub sesi_id: i64,
    pub peserta_id: i64,
    pub nama: String,
    pub status: StatusKehadiran,
    pub keterangan: String,
    pub is_override: bool,
    pub dicatat_oleh: Option<i64>,
    pub updated_at: String,
}

/// Where a resolved status came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SumberStatus {
    /// Recorded by an admin, wins over everything.
    Override,
    /// Self submitted by the participant.
    Mandiri,
    /// No record at all, counted as ghoib.
    Default,
}

/// Resolved status for one roster participant.
#[derive(Debug, Clone, Serialize)]
pub struct StatusPeserta {
    pub peserta_id: i64,
    pub nama: String,
    pub bidang: String,
    pub status: StatusKehadiran,
    pub status_label: String,
    pub keterangan: String,
    pub sumber: SumberStatus,
}

/// Per-status counts over the roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RekapAbsensi {
    pub hadir: i64,
    pub terlambat: i64,
    pub izin: i64,
    pub sakit: i64,
    pub ghoib: i64,
    pub total: i64,
}

impl RekapAbsensi {
    pub fn tambah(&mut self, status: StatusKehadiran) {
        match status {
            StatusKehadiran::Hadir => self.hadir += 1,
            StatusKehadiran::Terlambat => self.terlambat += 1,
            StatusKehadiran::Izin => self.izin += 1,
            StatusKehadiran::Sakit => self.sakit += 1,
            StatusKehadiran::Ghoib => self.ghoib += 1,
        }
        self.total += 1;
    }
}

/// Record from someone outside the effective roster. Reported for
/// review, never counted in the stats.
#[derive(Debug, Clone, Serialize)]
pub struct CatatanLuarDaftar {
    pub peserta_id: i64,
    pub nama: String,
    pub status: StatusKehadiran,
    pub status_label: String,
    pub is_override: bool,
}

/// Full attendance report for one session.
#[derive(Debug, Clone, Serialize)]
pub struct LaporanAbsensi {
    pub entri: Vec<StatusPeserta>,
    pub rekap: RekapAbsensi,
    pub luar_daftar: Vec<CatatanLuarDaftar>,
}
