use serde::Serialize;

use crate::models::status::StatusSesi;

/// One meeting session as stored.
#[derive(Debug, Clone)]
pub struct Sesi {
    pub id: i64,
    pub nama: String,
    pub deskripsi: String,
    pub tanggal: String,
    pub waktu_mulai: String,
    pub waktu_selesai: String,
    pub lokasi: String,
    pub kapasitas: i64,
    pub target_bidang: String,
    pub status: StatusSesi,
    pub created_at: String,
    pub updated_at: String,
}

impl Sesi {
    /// Target fields as a cleaned list. Stored comma separated; empty
    /// string means no auto-assignment.
    pub fn target_bidang_list(&self) -> Vec<&str> {
        self.target_bidang
            .split(',')
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .collect()
    }
}

/// Listing/detail projection with the label and assignment count.
#[derive(Debug, Clone, Serialize)]
pub struct SesiDisplay {
    pub id: i64,
    pub nama: String,
    pub deskripsi: String,
    pub tanggal: String,
    pub waktu_mulai: String,
    pub waktu_selesai: String,
    pub lokasi: String,
    pub kapasitas: i64,
    pub target_bidang: String,
    pub status: StatusSesi,
    pub status_label: String,
    pub jumlah_ditugaskan: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug)]
pub struct NewSesi {
    pub nama: String,
    pub deskripsi: String,
    pub tanggal: String,
    pub waktu_mulai: String,
    pub waktu_selesai: String,
    pub lokasi: String,
    pub kapasitas: i64,
    pub target_bidang: String,
}
