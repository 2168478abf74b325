use serde::Serialize;

use crate::models::status::StatusNotulensi;

/// Meeting minutes for one session. `version` counts content edits and
/// guards concurrent editors.
#[derive(Debug, Clone, Serialize)]
pub struct Notulensi {
    pub id: i64,
    pub sesi_id: i64,
    pub judul: String,
    pub isi: String,
    pub status: StatusNotulensi,
    pub version: i64,
    pub dibuat_oleh: i64,
    pub catatan_reviewer: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Listing/detail projection with names joined in.
#[derive(Debug, Clone, Serialize)]
pub struct NotulensiDisplay {
    pub id: i64,
    pub sesi_id: i64,
    pub sesi_nama: String,
    pub judul: String,
    pub isi: String,
    pub status: StatusNotulensi,
    pub status_label: String,
    pub version: i64,
    pub dibuat_oleh: i64,
    pub dibuat_oleh_nama: String,
    pub catatan_reviewer: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug)]
pub struct NewNotulensi {
    pub sesi_id: i64,
    pub judul: String,
    pub isi: String,
    pub dibuat_oleh: i64,
}
