//! Budget rollup for the annual work program.
//!
//! Every amount is whole rupiah in i64. Subtotals are derived, never
//! stored, so the books can't drift from the cost lines. Rolling up the
//! same data twice gives byte-identical results.

use std::collections::BTreeMap;

use serde::Serialize;

use super::types::{Kegiatan, RincianBiaya, RincianDisplay};

/// quantity x unit price x days x frequency.
pub fn subtotal(rincian: &RincianBiaya) -> i64 {
    rincian.jumlah * rincian.harga_satuan * rincian.hari * rincian.frekuensi
}

/// Sum of the line subtotals. An activity with no lines costs zero.
pub fn total_kegiatan(rincian: &[RincianBiaya]) -> i64 {
    rincian.iter().map(subtotal).sum()
}

pub fn to_display(rincian: &RincianBiaya) -> RincianDisplay {
    RincianDisplay {
        id: rincian.id,
        kegiatan_id: rincian.kegiatan_id,
        nama_item: rincian.nama_item.clone(),
        jumlah: rincian.jumlah,
        harga_satuan: rincian.harga_satuan,
        hari: rincian.hari,
        frekuensi: rincian.frekuensi,
        subtotal: subtotal(rincian),
        created_at: rincian.created_at.clone(),
        updated_at: rincian.updated_at.clone(),
    }
}

/// One activity's slice of the annual recap.
#[derive(Debug, Clone, Serialize)]
pub struct KegiatanTotal {
    pub kegiatan_id: i64,
    pub nama: String,
    pub bidang: String,
    pub bulan: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BidangTotal {
    pub bidang: String,
    pub total: i64,
}

/// Annual recap: per activity, per month, per field, and the grand
/// total. `per_bulan[0]` is January.
#[derive(Debug, Clone, Serialize)]
pub struct RekapProgramKerja {
    pub tahun: i64,
    pub kegiatan: Vec<KegiatanTotal>,
    pub per_bulan: [i64; 12],
    pub per_bidang: Vec<BidangTotal>,
    pub total_tahun: i64,
}

/// Roll one program year up from its activities and cost lines. Input
/// order does not matter; months index into a fixed array and fields
/// aggregate through an ordered map.
pub fn rollup(tahun: i64, items: &[(Kegiatan, Vec<RincianBiaya>)]) -> RekapProgramKerja {
    let mut kegiatan_totals = Vec::with_capacity(items.len());
    let mut per_bulan = [0i64; 12];
    let mut per_bidang: BTreeMap<String, i64> = BTreeMap::new();
    let mut total_tahun = 0i64;

    for (keg, rincian) in items {
        let total = total_kegiatan(rincian);
        kegiatan_totals.push(KegiatanTotal {
            kegiatan_id: keg.id,
            nama: keg.nama.clone(),
            bidang: keg.bidang.clone(),
            bulan: keg.bulan,
            total,
        });
        if (1..=12).contains(&keg.bulan) {
            per_bulan[(keg.bulan - 1) as usize] += total;
        }
        *per_bidang.entry(keg.bidang.clone()).or_insert(0) += total;
        total_tahun += total;
    }

    kegiatan_totals.sort_by(|a, b| {
        a.bulan
            .cmp(&b.bulan)
            .then_with(|| a.bidang.cmp(&b.bidang))
            .then_with(|| a.nama.cmp(&b.nama))
            .then(a.kegiatan_id.cmp(&b.kegiatan_id))
    });

    RekapProgramKerja {
        tahun,
        kegiatan: kegiatan_totals,
        per_bulan,
        per_bidang: per_bidang
            .into_iter()
            .map(|(bidang, total)| BidangTotal { bidang, total })
            .collect(),
        total_tahun,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rincian(jumlah: i64, harga: i64, hari: i64, frekuensi: i64) -> RincianBiaya {
        RincianBiaya {
            id: 0,
            kegiatan_id: 0,
            nama_item: "item".to_string(),
            jumlah,
            harga_satuan: harga,
            hari,
            frekuensi,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn kegiatan(id: i64, bidang: &str, bulan: i64, nama: &str) -> Kegiatan {
        Kegiatan {
            id,
            tahun: 2026,
            bidang: bidang.to_string(),
            bulan,
            nama: nama.to_string(),
            tujuan: String::new(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn subtotal_mengalikan_empat_faktor() {
        assert_eq!(subtotal(&rincian(2, 50_000, 3, 1)), 300_000);
        assert_eq!(subtotal(&rincian(10, 15_000, 1, 4)), 600_000);
    }

    #[test]
    fn kegiatan_tanpa_rincian_bernilai_nol() {
        assert_eq!(total_kegiatan(&[]), 0);
    }

    #[test]
    fn rekap_tahunan_menjumlah_per_tingkat() {
        let items = vec![
            (
                kegiatan(1, "kurikulum", 1, "Pelatihan guru"),
                vec![rincian(2, 50_000, 3, 1), rincian(30, 20_000, 1, 2)],
            ),
            (kegiatan(2, "kurikulum", 3, "Penyusunan modul"), vec![rincian(1, 0, 1, 1)]),
            (kegiatan(3, "sarana", 1, "Perbaikan aula"), vec![rincian(4, 250_000, 1, 1)]),
        ];
        let rekap = rollup(2026, &items);

        assert_eq!(rekap.total_tahun, 300_000 + 1_200_000 + 0 + 1_000_000);
        assert_eq!(rekap.per_bulan[0], 1_500_000 + 1_000_000);
        assert_eq!(rekap.per_bulan[2], 0);
        assert_eq!(rekap.per_bulan[5], 0);

        assert_eq!(rekap.per_bidang.len(), 2);
        assert_eq!(rekap.per_bidang[0].bidang, "kurikulum");
        assert_eq!(rekap.per_bidang[0].total, 1_500_000);
        assert_eq!(rekap.per_bidang[1].bidang, "sarana");
        assert_eq!(rekap.per_bidang[1].total, 1_000_000);
    }

    #[test]
    fn rekap_tidak_bergantung_urutan_masukan() {
        let a = (kegiatan(1, "kurikulum", 2, "A"), vec![rincian(1, 100, 1, 1)]);
        let b = (kegiatan(2, "sarana", 1, "B"), vec![rincian(2, 200, 1, 1)]);
        let maju = rollup(2026, &[a.clone(), b.clone()]);
        let mundur = rollup(2026, &[b, a]);

        assert_eq!(maju.total_tahun, mundur.total_tahun);
        assert_eq!(maju.per_bulan, mundur.per_bulan);
        let maju_ids: Vec<i64> = maju.kegiatan.iter().map(|k| k.kegiatan_id).collect();
        let mundur_ids: Vec<i64> = mundur.kegiatan.iter().map(|k| k.kegiatan_id).collect();
        assert_eq!(maju_ids, mundur_ids);
    }

    #[test]
    fn rekap_tahun_kosong() {
        let rekap = rollup(2026, &[]);
        assert_eq!(rekap.total_tahun, 0);
        assert_eq!(rekap.per_bulan, [0i64; 12]);
        assert!(rekap.kegiatan.is_empty());
        assert!(rekap.per_bidang.is_empty());
    }
}
