pub mod absensi;
pub mod dashboard;
pub mod file_link;
pub mod kbm;
pub mod notulensi;
pub mod peserta;
pub mod program_kerja;
pub mod sesi;
pub mod status;
