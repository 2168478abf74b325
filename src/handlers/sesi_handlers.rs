use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{principal, validate};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::status::StatusSesi;
use crate::models::{peserta, sesi};

#[derive(Debug, Deserialize)]
pub struct SesiRequest {
    pub nama: String,
    #[serde(default)]
    pub deskripsi: String,
    pub tanggal: String,
    #[serde(default)]
    pub waktu_mulai: String,
    #[serde(default)]
    pub waktu_selesai: String,
    #[serde(default)]
    pub lokasi: String,
    #[serde(default)]
    pub kapasitas: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub peserta_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct AutoAssignRequest {
    pub target_bidang: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AssignFailure {
    peserta_id: i64,
    alasan: String,
}

fn validate_sesi(body: &SesiRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&body.nama, "nama", 200));
    errors.extend(validate::validate_optional(&body.deskripsi, "deskripsi", 2000));
    errors.extend(validate::validate_tanggal(&body.tanggal, "tanggal"));
    errors.extend(validate::validate_waktu(&body.waktu_mulai, "waktu_mulai"));
    errors.extend(validate::validate_waktu(&body.waktu_selesai, "waktu_selesai"));
    errors.extend(validate::validate_optional(&body.lokasi, "lokasi", 200));
    errors.extend(validate::validate_non_negatif(body.kapasitas, "kapasitas"));
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors.join("; ")))
    }
}

fn to_new_sesi(body: &SesiRequest, target_bidang: String) -> sesi::NewSesi {
    sesi::NewSesi {
        nama: body.nama.trim().to_string(),
        deskripsi: body.deskripsi.trim().to_string(),
        tanggal: body.tanggal.trim().to_string(),
        waktu_mulai: body.waktu_mulai.trim().to_string(),
        waktu_selesai: body.waktu_selesai.trim().to_string(),
        lokasi: body.lokasi.trim().to_string(),
        kapasitas: body.kapasitas,
        target_bidang,
    }
}

/// GET /api/sesi - List sessions, newest first
/// Query params: status (scheduled|active|completed|cancelled)
pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let status = match query.get("status").map(String::as_str) {
        Some(raw) if !raw.is_empty() => Some(
            StatusSesi::from_str(raw)
                .ok_or_else(|| AppError::Validation(format!("status '{raw}' tidak dikenal")))?,
        ),
        _ => None,
    };

    let conn = pool.get()?;
    let daftar = sesi::find_all(&conn, status)?;
    Ok(HttpResponse::Ok().json(daftar))
}

/// GET /api/sesi/{id}
pub async fn read(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let conn = pool.get()?;
    let ditemukan =
        sesi::find_display_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ditemukan))
}

/// POST /api/sesi - Schedule a session (pengurus)
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<SesiRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    validate_sesi(&body)?;

    let conn = pool.get()?;
    let id = sesi::create(&conn, &to_new_sesi(&body, String::new()))?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "sesi.created",
        "sesi",
        id,
        serde_json::json!({ "nama": body.nama.trim(), "tanggal": body.tanggal.trim() }),
    );

    let dibuat = sesi::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(dibuat))
}

/// PUT /api/sesi/{id} - Edit schedule fields (pengurus)
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<SesiRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    validate_sesi(&body)?;

    let id = path.into_inner();
    let conn = pool.get()?;
    if !sesi::update(&conn, id, &to_new_sesi(&body, String::new()))? {
        return Err(AppError::NotFound);
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "sesi.updated",
        "sesi",
        id,
        serde_json::json!({ "nama": body.nama.trim() }),
    );

    let hasil = sesi::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(hasil))
}

/// PUT /api/sesi/{id}/status - Move the session through its lifecycle
/// (pengurus). Sessions are cancelled, never deleted, so attendance and
/// minutes keep their anchor.
pub async fn update_status(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<StatusRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;

    let status = StatusSesi::from_str(&body.status)
        .ok_or_else(|| AppError::Validation(format!("status '{}' tidak dikenal", body.status)))?;

    let id = path.into_inner();
    let conn = pool.get()?;
    if !sesi::update_status(&conn, id, status)? {
        return Err(AppError::NotFound);
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "sesi.status_changed",
        "sesi",
        id,
        serde_json::json!({ "status": status.as_str() }),
    );

    let hasil = sesi::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(hasil))
}

/// POST /api/sesi/{id}/peserta - Explicitly assign a list of
/// participants (pengurus). Reports per-id outcomes instead of aborting
/// the batch.
pub async fn assign(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<AssignRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;

    if body.peserta_ids.is_empty() {
        return Err(AppError::Validation("peserta_ids tidak boleh kosong".to_string()));
    }

    let sesi_id = path.into_inner();
    let conn = pool.get()?;
    let target = sesi::find_display_by_id(&conn, sesi_id)?.ok_or(AppError::NotFound)?;

    let mut terisi = target.jumlah_ditugaskan;
    let mut ditambahkan = 0i64;
    let mut gagal: Vec<AssignFailure> = Vec::new();
    for &peserta_id in &body.peserta_ids {
        let anggota = match peserta::find_display_by_id(&conn, peserta_id)? {
            Some(p) => p,
            None => {
                gagal.push(AssignFailure {
                    peserta_id,
                    alasan: "peserta tidak ditemukan".to_string(),
                });
                continue;
            }
        };
        if !anggota.aktif {
            gagal.push(AssignFailure {
                peserta_id,
                alasan: "peserta tidak aktif".to_string(),
            });
            continue;
        }
        if target.kapasitas > 0 && terisi >= target.kapasitas {
            gagal.push(AssignFailure {
                peserta_id,
                alasan: "kapasitas sesi sudah penuh".to_string(),
            });
            continue;
        }
        if sesi::assign_peserta(&conn, sesi_id, peserta_id)? {
            ditambahkan += 1;
            terisi += 1;
        } else {
            gagal.push(AssignFailure {
                peserta_id,
                alasan: "sudah ditugaskan".to_string(),
            });
        }
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "sesi.peserta_assigned",
        "sesi",
        sesi_id,
        serde_json::json!({ "ditambahkan": ditambahkan, "gagal": gagal.len() }),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "ditambahkan": ditambahkan,
        "gagal": gagal,
    })))
}

/// DELETE /api/sesi/{id}/peserta/{peserta_id} - Drop an explicit
/// assignment (pengurus). A participant still matched by the target
/// fields stays on the effective roster.
pub async fn unassign(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;

    let (sesi_id, peserta_id) = path.into_inner();
    let conn = pool.get()?;
    sesi::find_by_id(&conn, sesi_id)?.ok_or(AppError::NotFound)?;
    if !sesi::unassign_peserta(&conn, sesi_id, peserta_id)? {
        return Err(AppError::NotFound);
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "sesi.peserta_unassigned",
        "sesi",
        sesi_id,
        serde_json::json!({ "peserta_id": peserta_id }),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Penugasan dihapus" })))
}

/// POST /api/sesi/{id}/auto-assign - Set the target fields (pengurus)
/// and answer with the resulting roster.
pub async fn auto_assign(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<AutoAssignRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;

    let mut errors = Vec::new();
    for bidang in &body.target_bidang {
        errors.extend(validate::validate_required(bidang, "target_bidang", 100));
        if bidang.contains(',') {
            errors.push("target_bidang tidak boleh memuat koma".to_string());
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join("; ")));
    }

    let sesi_id = path.into_inner();
    let target = body
        .target_bidang
        .iter()
        .map(|b| b.trim())
        .collect::<Vec<_>>()
        .join(",");

    let conn = pool.get()?;
    sesi::find_by_id(&conn, sesi_id)?.ok_or(AppError::NotFound)?;
    sesi::set_target_bidang(&conn, sesi_id, &target)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "sesi.auto_assign_set",
        "sesi",
        sesi_id,
        serde_json::json!({ "target_bidang": target }),
    );

    let dimuat = sesi::find_by_id(&conn, sesi_id)?.ok_or(AppError::NotFound)?;
    let daftar = sesi::roster::resolve(&conn, &dimuat)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "sesi_id": sesi_id,
        "target_bidang": dimuat.target_bidang,
        "jumlah": daftar.len(),
        "peserta": daftar,
    })))
}

/// GET /api/sesi/{id}/roster - The effective roster: explicit
/// assignments unioned with field matches, inactive accounts excluded.
pub async fn roster(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let conn = pool.get()?;
    let dimuat = sesi::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let daftar = sesi::roster::resolve(&conn, &dimuat)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "sesi_id": dimuat.id,
        "jumlah": daftar.len(),
        "peserta": daftar,
    })))
}
