use serde::Serialize;

/// Monthly learning report for one study group in one village.
/// `periode` is `YYYY-MM`. One row per village, group, period and
/// program category.
#[derive(Debug, Clone, Serialize)]
pub struct LaporanKbm {
    pub id: i64,
    pub desa: String,
    pub kelompok: String,
    pub periode: String,
    pub kategori_program: String,
    pub jumlah_siswa: i64,
    pub jumlah_hadir: i64,
    pub persentase_kehadiran: i64,
    pub keterangan: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug)]
pub struct NewLaporanKbm {
    pub desa: String,
    pub kelompok: String,
    pub periode: String,
    pub kategori_program: String,
    pub jumlah_siswa: i64,
    pub jumlah_hadir: i64,
    pub persentase_kehadiran: i64,
    pub keterangan: String,
}
