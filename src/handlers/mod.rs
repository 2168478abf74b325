pub mod absensi_handlers;
pub mod auth_handlers;
pub mod dashboard;
pub mod file_link_handlers;
pub mod kbm_handlers;
pub mod notulensi_handlers;
pub mod peserta_handlers;
pub mod program_kerja_handlers;
pub mod sesi_handlers;
