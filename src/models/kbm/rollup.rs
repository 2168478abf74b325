//! Village and program-category rollups over the learning reports.
//!
//! Aggregate percentages are recomputed from the summed head counts,
//! never averaged from the per-row percentages, so a big group and a
//! small group weigh in proportion.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::LaporanKbm;

/// Integer percentage with half-up rounding. Zero students is zero
/// percent, not a division error.
pub fn persentase(hadir: i64, siswa: i64) -> i64 {
    if siswa <= 0 {
        return 0;
    }
    (hadir * 100 + siswa / 2) / siswa
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct KelompokAgregat {
    pub nama: String,
    pub jumlah_laporan: i64,
    pub jumlah_siswa: i64,
    pub jumlah_hadir: i64,
    pub persentase_kehadiran: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RekapKbm {
    pub per_desa: Vec<KelompokAgregat>,
    pub per_kategori: Vec<KelompokAgregat>,
    pub total: KelompokAgregat,
}

fn agregasi<'a, F>(rows: &'a [LaporanKbm], kunci: F) -> Vec<KelompokAgregat>
where
    F: Fn(&'a LaporanKbm) -> &'a str,
{
    let mut map: BTreeMap<&str, (i64, i64, i64)> = BTreeMap::new();
    for row in rows {
        let entry = map.entry(kunci(row)).or_insert((0, 0, 0));
        entry.0 += 1;
        entry.1 += row.jumlah_siswa;
        entry.2 += row.jumlah_hadir;
    }
    map.into_iter()
        .map(|(nama, (laporan, siswa, hadir))| KelompokAgregat {
            nama: nama.to_string(),
            jumlah_laporan: laporan,
            jumlah_siswa: siswa,
            jumlah_hadir: hadir,
            persentase_kehadiran: persentase(hadir, siswa),
        })
        .collect()
}

/// Build the dashboard recap from a filtered report list.
pub fn rekap(rows: &[LaporanKbm]) -> RekapKbm {
    let jumlah_siswa: i64 = rows.iter().map(|r| r.jumlah_siswa).sum();
    let jumlah_hadir: i64 = rows.iter().map(|r| r.jumlah_hadir).sum();
    RekapKbm {
        per_desa: agregasi(rows, |r| &r.desa),
        per_kategori: agregasi(rows, |r| &r.kategori_program),
        total: KelompokAgregat {
            nama: "total".to_string(),
            jumlah_laporan: rows.len() as i64,
            jumlah_siswa,
            jumlah_hadir,
            persentase_kehadiran: persentase(jumlah_hadir, jumlah_siswa),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laporan(desa: &str, kategori: &str, siswa: i64, hadir: i64) -> LaporanKbm {
        LaporanKbm {
            id: 0,
            desa: desa.to_string(),
            kelompok: "A".to_string(),
            periode: "2026-01".to_string(),
            kategori_program: kategori.to_string(),
            jumlah_siswa: siswa,
            jumlah_hadir: hadir,
            persentase_kehadiran: persentase(hadir, siswa),
            keterangan: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn persentase_setengah_dibulatkan_ke_atas() {
        assert_eq!(persentase(1, 3), 33);
        assert_eq!(persentase(2, 3), 67);
        assert_eq!(persentase(1, 2), 50);
        assert_eq!(persentase(0, 0), 0);
        assert_eq!(persentase(5, 5), 100);
    }

    #[test]
    fn rekap_menimbang_kelompok_sesuai_ukuran() {
        // 90/100 and 1/10 must not average to 72%.
        let rows = vec![
            laporan("Banjarsari", "paud", 100, 90),
            laporan("Banjarsari", "caberawit", 10, 1),
        ];
        let hasil = rekap(&rows);
        assert_eq!(hasil.per_desa.len(), 1);
        assert_eq!(hasil.per_desa[0].jumlah_siswa, 110);
        assert_eq!(hasil.per_desa[0].jumlah_hadir, 91);
        assert_eq!(hasil.per_desa[0].persentase_kehadiran, 83);
        assert_eq!(hasil.total.persentase_kehadiran, 83);
    }

    #[test]
    fn rekap_memisahkan_desa_dan_kategori() {
        let rows = vec![
            laporan("Banjarsari", "paud", 20, 18),
            laporan("Cikampek", "paud", 30, 24),
            laporan("Cikampek", "pra_remaja", 10, 10),
        ];
        let hasil = rekap(&rows);
        assert_eq!(hasil.per_desa.len(), 2);
        assert_eq!(hasil.per_kategori.len(), 2);
        assert_eq!(hasil.per_desa[0].nama, "Banjarsari");
        assert_eq!(hasil.per_kategori[0].nama, "paud");
        assert_eq!(hasil.per_kategori[0].jumlah_laporan, 2);
        assert_eq!(hasil.total.jumlah_laporan, 3);
    }

    #[test]
    fn rekap_kosong() {
        let hasil = rekap(&[]);
        assert!(hasil.per_desa.is_empty());
        assert!(hasil.per_kategori.is_empty());
        assert_eq!(hasil.total.jumlah_siswa, 0);
        assert_eq!(hasil.total.persentase_kehadiran, 0);
    }
}
