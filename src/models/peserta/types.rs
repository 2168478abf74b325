use serde::Serialize;

use crate::models::status::Role;

/// Full row including the password hash. Internal use only, never serialized.
#[derive(Debug, Clone)]
pub struct Peserta {
    pub id: i64,
    pub nama: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub bidang: String,
    pub aktif: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Projection returned by the API. No credential material.
#[derive(Debug, Clone, Serialize)]
pub struct PesertaDisplay {
    pub id: i64,
    pub nama: String,
    pub username: String,
    pub role: Role,
    pub role_label: String,
    pub bidang: String,
    pub aktif: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Payload for creating a participant. `password` is already hashed.
#[derive(Debug)]
pub struct NewPeserta {
    pub nama: String,
    pub username: String,
    pub password: String,
    pub role: Role,
    pub bidang: String,
}

/// Fields an edit may change. Username stays fixed after creation.
#[derive(Debug)]
pub struct PesertaUpdate {
    pub nama: String,
    pub role: Role,
    pub bidang: String,
    pub aktif: bool,
}
