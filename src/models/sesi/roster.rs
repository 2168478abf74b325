//! Effective roster resolution.
//!
//! A session's roster is the union of explicit assignments and
//! auto-assignment by field (`target_bidang`), deduplicated per
//! participant. Inactive participants never appear, including ones
//! that were explicitly assigned before deactivation.

use std::collections::BTreeMap;

use rusqlite::{params, Connection};
use serde::Serialize;

use super::types::Sesi;

/// One participant in the effective roster.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RosterEntry {
    pub peserta_id: i64,
    pub nama: String,
    pub bidang: String,
    /// True when the participant was assigned by hand rather than (or in
    /// addition to) matching the session's target fields.
    pub ditugaskan_manual: bool,
}

/// Explicitly assigned participants that are still active.
fn find_explicit(conn: &Connection, sesi_id: i64) -> rusqlite::Result<Vec<RosterEntry>> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.nama, p.bidang \
         FROM sesi_peserta sp \
         JOIN peserta p ON p.id = sp.peserta_id \
         WHERE sp.sesi_id = ?1 AND p.aktif = 1",
    )?;
    let rows = stmt.query_map(params![sesi_id], |row| {
        Ok(RosterEntry {
            peserta_id: row.get(0)?,
            nama: row.get(1)?,
            bidang: row.get(2)?,
            ditugaskan_manual: true,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>()
}

/// Active participants whose field matches one of the session's targets.
fn find_by_bidang(conn: &Connection, bidang_list: &[&str]) -> rusqlite::Result<Vec<RosterEntry>> {
    if bidang_list.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = (1..=bidang_list.len())
        .map(|i| format!("?{i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT id, nama, bidang FROM peserta \
         WHERE aktif = 1 AND bidang IN ({placeholders})"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(bidang_list.iter()), |row| {
        Ok(RosterEntry {
            peserta_id: row.get(0)?,
            nama: row.get(1)?,
            bidang: row.get(2)?,
            ditugaskan_manual: false,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>()
}

/// Union the two candidate sets. A participant in both keeps the manual
/// flag. Output is ordered by name, then id, so repeated resolutions of
/// unchanged data produce identical lists.
pub fn merge(explicit: Vec<RosterEntry>, auto: Vec<RosterEntry>) -> Vec<RosterEntry> {
    let mut by_id: BTreeMap<i64, RosterEntry> = BTreeMap::new();
    for entry in auto {
        by_id.insert(entry.peserta_id, entry);
    }
    for entry in explicit {
        // Manual assignment wins over (or augments) a field match.
        by_id.insert(entry.peserta_id, entry);
    }
    let mut roster: Vec<RosterEntry> = by_id.into_values().collect();
    roster.sort_by(|a, b| a.nama.cmp(&b.nama).then(a.peserta_id.cmp(&b.peserta_id)));
    roster
}

/// Resolve the effective roster for a loaded session.
pub fn resolve(conn: &Connection, sesi: &Sesi) -> rusqlite::Result<Vec<RosterEntry>> {
    let explicit = find_explicit(conn, sesi.id)?;
    let auto = find_by_bidang(conn, &sesi.target_bidang_list())?;
    Ok(merge(explicit, auto))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, nama: &str, bidang: &str, manual: bool) -> RosterEntry {
        RosterEntry {
            peserta_id: id,
            nama: nama.to_string(),
            bidang: bidang.to_string(),
            ditugaskan_manual: manual,
        }
    }

    #[test]
    fn merge_dedups_overlapping_participant() {
        let explicit = vec![entry(1, "Ahmad", "kurikulum", true)];
        let auto = vec![
            entry(1, "Ahmad", "kurikulum", false),
            entry(2, "Budi", "kurikulum", false),
        ];
        let roster = merge(explicit, auto);
        assert_eq!(roster.len(), 2);
        assert!(roster[0].ditugaskan_manual, "manual flag survives the union");
        assert!(!roster[1].ditugaskan_manual);
    }

    #[test]
    fn merge_orders_by_name_then_id() {
        let explicit = vec![entry(9, "Citra", "sarana", true)];
        let auto = vec![
            entry(3, "Budi", "kurikulum", false),
            entry(7, "Budi", "sarana", false),
        ];
        let roster = merge(explicit, auto);
        let ids: Vec<i64> = roster.iter().map(|e| e.peserta_id).collect();
        assert_eq!(ids, vec![3, 7, 9]);
    }

    #[test]
    fn merge_of_empty_sets_is_empty() {
        assert!(merge(Vec::new(), Vec::new()).is_empty());
    }
}
