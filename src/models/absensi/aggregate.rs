//! Attendance resolution for one session.
//!
//! Precedence per roster participant: admin override, then self
//! submission, then the ghoib default when no record exists. Records
//! from participants outside the roster are listed separately and kept
//! out of the counts.

use std::collections::HashMap;

use super::types::{
    AbsensiRecord, CatatanLuarDaftar, LaporanAbsensi, RekapAbsensi, StatusPeserta, SumberStatus,
};
use crate::models::sesi::RosterEntry;
use crate::models::status::StatusKehadiran;

/// Timestamps are `YYYY-MM-DD HH:MM:SS`, so string order is time order.
/// Id breaks ties between rows written in the same second.
fn lebih_baru(a: &AbsensiRecord, b: &AbsensiRecord) -> bool {
    (a.updated_at.as_str(), a.id) > (b.updated_at.as_str(), b.id)
}

/// Keep the freshest record per participant for one kind.
fn index_terbaru<'a>(
    records: &'a [AbsensiRecord],
    is_override: bool,
) -> HashMap<i64, &'a AbsensiRecord> {
    let mut by_peserta: HashMap<i64, &AbsensiRecord> = HashMap::new();
    for rec in records.iter().filter(|r| r.is_override == is_override) {
        match by_peserta.get(&rec.peserta_id) {
            Some(existing) if !lebih_baru(rec, existing) => {}
            _ => {
                by_peserta.insert(rec.peserta_id, rec);
            }
        }
    }
    by_peserta
}

/// Resolve the report from the effective roster and the stored rows.
pub fn resolve(roster: &[RosterEntry], records: &[AbsensiRecord]) -> LaporanAbsensi {
    let overrides = index_terbaru(records, true);
    let mandiri = index_terbaru(records, false);

    let mut entri = Vec::with_capacity(roster.len());
    let mut rekap = RekapAbsensi::default();
    for anggota in roster {
        let (status, keterangan, sumber) =
            match (overrides.get(&anggota.peserta_id), mandiri.get(&anggota.peserta_id)) {
                (Some(rec), _) => (rec.status, rec.keterangan.clone(), SumberStatus::Override),
                (None, Some(rec)) => (rec.status, rec.keterangan.clone(), SumberStatus::Mandiri),
                (None, None) => (StatusKehadiran::Ghoib, String::new(), SumberStatus::Default),
            };
        rekap.tambah(status);
        entri.push(StatusPeserta {
            peserta_id: anggota.peserta_id,
            nama: anggota.nama.clone(),
            bidang: anggota.bidang.clone(),
            status,
            status_label: status.label().to_string(),
            keterangan,
            sumber,
        });
    }

    // Same precedence for the leftovers, one line per participant.
    let di_daftar: std::collections::HashSet<i64> =
        roster.iter().map(|e| e.peserta_id).collect();
    let mut luar_ids: Vec<i64> = records
        .iter()
        .filter(|r| !di_daftar.contains(&r.peserta_id))
        .map(|r| r.peserta_id)
        .collect();
    luar_ids.sort_unstable();
    luar_ids.dedup();

    let mut luar_daftar = Vec::with_capacity(luar_ids.len());
    for peserta_id in luar_ids {
        let rec = match (overrides.get(&peserta_id), mandiri.get(&peserta_id)) {
            (Some(rec), _) => rec,
            (None, Some(rec)) => rec,
            (None, None) => continue,
        };
        luar_daftar.push(CatatanLuarDaftar {
            peserta_id,
            nama: rec.nama.clone(),
            status: rec.status,
            status_label: rec.status.label().to_string(),
            is_override: rec.is_override,
        });
    }
    luar_daftar.sort_by(|a, b| a.nama.cmp(&b.nama).then(a.peserta_id.cmp(&b.peserta_id)));

    LaporanAbsensi {
        entri,
        rekap,
        luar_daftar,
    }
}
