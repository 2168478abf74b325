//! Field validators. Each check returns `Some(message)` on failure so a
//! handler can collect every problem before rejecting the request.

use chrono::{NaiveDate, NaiveTime};

/// Validate a username: 2-50 chars, alphanumeric and underscore only.
pub fn validate_username(username: &str) -> Option<String> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Some("username wajib diisi".to_string());
    }
    if trimmed.len() < 2 {
        return Some("username minimal 2 karakter".to_string());
    }
    if trimmed.len() > 50 {
        return Some("username maksimal 50 karakter".to_string());
    }
    if !trimmed.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Some("username hanya boleh huruf, angka, dan garis bawah".to_string());
    }
    None
}

/// Validate a password: min 8 chars on create.
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("password wajib diisi".to_string());
    }
    if password.len() < 8 {
        return Some("password minimal 8 karakter".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} wajib diisi"));
    }
    if trimmed.len() > max_len {
        return Some(format!("{field_name} maksimal {max_len} karakter"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.len() > max_len {
        return Some(format!("{field_name} maksimal {max_len} karakter"));
    }
    None
}

/// Validate a date in YYYY-MM-DD form.
pub fn validate_tanggal(value: &str, field_name: &str) -> Option<String> {
    if NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").is_err() {
        return Some(format!("{field_name} harus berformat YYYY-MM-DD"));
    }
    None
}

/// Validate an optional time in HH:MM form (empty is OK).
pub fn validate_waktu(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if NaiveTime::parse_from_str(trimmed, "%H:%M").is_err() {
        return Some(format!("{field_name} harus berformat HH:MM"));
    }
    None
}

/// Validate a reporting period in YYYY-MM form.
pub fn validate_periode(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    let valid = trimmed.len() == 7
        && NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d").is_ok();
    if !valid {
        return Some(format!("{field_name} harus berformat YYYY-MM"));
    }
    None
}

/// Validate a calendar month number.
pub fn validate_bulan(value: i64) -> Option<String> {
    if !(1..=12).contains(&value) {
        return Some("bulan harus antara 1 dan 12".to_string());
    }
    None
}

/// Validate a program-plan year.
pub fn validate_tahun(value: i64) -> Option<String> {
    if !(2000..=2100).contains(&value) {
        return Some("tahun harus antara 2000 dan 2100".to_string());
    }
    None
}

/// Validate a percentage field (0-100 inclusive).
pub fn validate_persentase(value: i64, field_name: &str) -> Option<String> {
    if !(0..=100).contains(&value) {
        return Some(format!("{field_name} harus antara 0 dan 100"));
    }
    None
}

/// Validate a non-negative integer amount (counts, prices, capacities).
pub fn validate_non_negatif(value: i64, field_name: &str) -> Option<String> {
    if value < 0 {
        return Some(format!("{field_name} tidak boleh negatif"));
    }
    None
}

/// Validate a catalogue URL: required, http(s) only.
pub fn validate_url(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} wajib diisi"));
    }
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Some(format!("{field_name} harus diawali http:// atau https://"));
    }
    if trimmed.len() > 2000 {
        return Some(format!("{field_name} maksimal 2000 karakter"));
    }
    None
}
