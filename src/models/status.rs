//! Closed status/role enums with their wire strings and display labels.
//!
//! Every status comparison in the crate goes through these types; raw
//! strings only exist at the storage and JSON boundaries.

use serde::{Deserialize, Serialize};

/// Attendance status for one participant in one session.
/// `Ghoib` (unexcused absence) is the default for a roster participant
/// with no record; it is assigned, never self-claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKehadiran {
    Hadir,
    Terlambat,
    Izin,
    Sakit,
    Ghoib,
}

impl StatusKehadiran {
    pub const ALL: [StatusKehadiran; 5] = [
        StatusKehadiran::Hadir,
        StatusKehadiran::Terlambat,
        StatusKehadiran::Izin,
        StatusKehadiran::Sakit,
        StatusKehadiran::Ghoib,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKehadiran::Hadir => "hadir",
            StatusKehadiran::Terlambat => "terlambat",
            StatusKehadiran::Izin => "izin",
            StatusKehadiran::Sakit => "sakit",
            StatusKehadiran::Ghoib => "ghoib",
        }
    }

    pub fn from_str(s: &str) -> Option<StatusKehadiran> {
        match s {
            "hadir" => Some(StatusKehadiran::Hadir),
            "terlambat" => Some(StatusKehadiran::Terlambat),
            "izin" => Some(StatusKehadiran::Izin),
            "sakit" => Some(StatusKehadiran::Sakit),
            "ghoib" => Some(StatusKehadiran::Ghoib),
            _ => None,
        }
    }

    /// Display label for the UI and exports.
    pub fn label(&self) -> &'static str {
        match self {
            StatusKehadiran::Hadir => "Hadir",
            StatusKehadiran::Terlambat => "Terlambat",
            StatusKehadiran::Izin => "Izin",
            StatusKehadiran::Sakit => "Sakit",
            StatusKehadiran::Ghoib => "Tanpa Keterangan (Ghoib)",
        }
    }

    /// Statuses a participant may self-submit. `Ghoib` is excluded:
    /// it is only ever assigned by default or by an admin override.
    pub fn self_submittable(&self) -> bool {
        !matches!(self, StatusKehadiran::Ghoib)
    }
}

/// Session lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSesi {
    Scheduled,
    Active,
    Completed,
    Cancelled,
}

impl StatusSesi {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusSesi::Scheduled => "scheduled",
            StatusSesi::Active => "active",
            StatusSesi::Completed => "completed",
            StatusSesi::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<StatusSesi> {
        match s {
            "scheduled" => Some(StatusSesi::Scheduled),
            "active" => Some(StatusSesi::Active),
            "completed" => Some(StatusSesi::Completed),
            "cancelled" => Some(StatusSesi::Cancelled),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusSesi::Scheduled => "Terjadwal",
            StatusSesi::Active => "Berlangsung",
            StatusSesi::Completed => "Selesai",
            StatusSesi::Cancelled => "Dibatalkan",
        }
    }
}

/// Meeting-minutes workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusNotulensi {
    Draft,
    PendingApproval,
    Approved,
    Rejected,
}

impl StatusNotulensi {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusNotulensi::Draft => "draft",
            StatusNotulensi::PendingApproval => "pending_approval",
            StatusNotulensi::Approved => "approved",
            StatusNotulensi::Rejected => "rejected",
        }
    }

    pub fn from_str(s: &str) -> Option<StatusNotulensi> {
        match s {
            "draft" => Some(StatusNotulensi::Draft),
            "pending_approval" => Some(StatusNotulensi::PendingApproval),
            "approved" => Some(StatusNotulensi::Approved),
            "rejected" => Some(StatusNotulensi::Rejected),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusNotulensi::Draft => "Draf",
            StatusNotulensi::PendingApproval => "Menunggu Persetujuan",
            StatusNotulensi::Approved => "Disetujui",
            StatusNotulensi::Rejected => "Ditolak",
        }
    }

    /// The minutes workflow: draft -> pending_approval -> approved | rejected,
    /// and rejected -> draft when the author revises.
    pub fn can_transition(from: StatusNotulensi, to: StatusNotulensi) -> bool {
        matches!(
            (from, to),
            (StatusNotulensi::Draft, StatusNotulensi::PendingApproval)
                | (StatusNotulensi::PendingApproval, StatusNotulensi::Approved)
                | (StatusNotulensi::PendingApproval, StatusNotulensi::Rejected)
                | (StatusNotulensi::Rejected, StatusNotulensi::Draft)
        )
    }
}

/// Application role carried on the participant record and the session
/// principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Pengurus,
    Peserta,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Pengurus => "pengurus",
            Role::Peserta => "peserta",
        }
    }

    pub fn from_str(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "pengurus" => Some(Role::Pengurus),
            "peserta" => Some(Role::Peserta),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Pengurus => "Pengurus",
            Role::Peserta => "Peserta",
        }
    }
}
