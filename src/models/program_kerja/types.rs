use serde::Serialize;

/// One planned activity in a field's annual work program.
#[derive(Debug, Clone, Serialize)]
pub struct Kegiatan {
    pub id: i64,
    pub tahun: i64,
    pub bidang: String,
    /// Planned month, 1 through 12.
    pub bulan: i64,
    pub nama: String,
    pub tujuan: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug)]
pub struct NewKegiatan {
    pub tahun: i64,
    pub bidang: String,
    pub bulan: i64,
    pub nama: String,
    pub tujuan: String,
}

/// One cost line under an activity. Amounts are whole rupiah in i64;
/// no floats anywhere in the money path.
#[derive(Debug, Clone, Serialize)]
pub struct RincianBiaya {
    pub id: i64,
    pub kegiatan_id: i64,
    pub nama_item: String,
    pub jumlah: i64,
    pub harga_satuan: i64,
    pub hari: i64,
    pub frekuensi: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug)]
pub struct NewRincian {
    pub nama_item: String,
    pub jumlah: i64,
    pub harga_satuan: i64,
    pub hari: i64,
    pub frekuensi: i64,
}

/// Cost line with its derived subtotal for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct RincianDisplay {
    pub id: i64,
    pub kegiatan_id: i64,
    pub nama_item: String,
    pub jumlah: i64,
    pub harga_satuan: i64,
    pub hari: i64,
    pub frekuensi: i64,
    pub subtotal: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// Activity with its cost lines and total, as served on detail screens.
#[derive(Debug, Clone, Serialize)]
pub struct KegiatanDetail {
    pub kegiatan: Kegiatan,
    pub rincian: Vec<RincianDisplay>,
    pub total: i64,
}
