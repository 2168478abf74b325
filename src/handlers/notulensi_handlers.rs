use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{principal, validate};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::status::StatusNotulensi;
use crate::models::{notulensi, sesi};

#[derive(Debug, Deserialize)]
pub struct NotulensiRequest {
    pub judul: String,
    #[serde(default)]
    pub isi: String,
    /// Version the editor loaded; a stale value means someone else saved
    /// in between and the edit is refused.
    pub version: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
    #[serde(default)]
    pub catatan: String,
}

fn validate_isi(judul: &str, isi: &str) -> Result<(), AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(judul, "judul", 200));
    errors.extend(validate::validate_optional(isi, "isi", 50_000));
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors.join("; ")))
    }
}

/// GET /api/notulensi - List minutes, newest first
/// Query params: status (draft|pending_approval|approved|rejected)
pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let status = match query.get("status").map(String::as_str) {
        Some(raw) if !raw.is_empty() => Some(
            StatusNotulensi::from_str(raw)
                .ok_or_else(|| AppError::Validation(format!("status '{raw}' tidak dikenal")))?,
        ),
        _ => None,
    };

    let conn = pool.get()?;
    let daftar = notulensi::find_all(&conn, status)?;
    Ok(HttpResponse::Ok().json(daftar))
}

/// GET /api/notulensi/{id}
pub async fn read(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let conn = pool.get()?;
    let ditemukan =
        notulensi::find_display_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ditemukan))
}

/// POST /api/sesi/{id}/notulensi - Start the minutes for a session
/// (pengurus). A session carries at most one document.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<NotulensiRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    validate_isi(&body.judul, &body.isi)?;

    let sesi_id = path.into_inner();
    let conn = pool.get()?;
    sesi::find_by_id(&conn, sesi_id)?.ok_or(AppError::NotFound)?;
    if notulensi::find_by_sesi(&conn, sesi_id)?.is_some() {
        return Err(AppError::Conflict(
            "notulensi untuk sesi ini sudah ada".to_string(),
        ));
    }

    let baru = notulensi::NewNotulensi {
        sesi_id,
        judul: body.judul.trim().to_string(),
        isi: body.isi.clone(),
        dibuat_oleh: who.id,
    };
    let id = notulensi::create(&conn, &baru)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "notulensi.created",
        "notulensi",
        id,
        serde_json::json!({ "sesi_id": sesi_id, "judul": baru.judul }),
    );

    let dibuat = notulensi::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(dibuat))
}

/// PUT /api/notulensi/{id} - Edit the content. Draft only; the body
/// carries the version that was loaded and a stale one is answered 409.
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<NotulensiRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    validate_isi(&body.judul, &body.isi)?;
    let version = body
        .version
        .ok_or_else(|| AppError::Validation("version wajib disertakan".to_string()))?;

    let id = path.into_inner();
    let conn = pool.get()?;
    let muatan = notulensi::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    if !who.is_admin() && muatan.dibuat_oleh != who.id {
        return Err(AppError::Forbidden("bukan pembuat notulensi".to_string()));
    }
    if muatan.status != StatusNotulensi::Draft {
        return Err(AppError::Validation(
            "hanya notulensi berstatus draf yang dapat diubah".to_string(),
        ));
    }

    if !notulensi::update_content(&conn, id, body.judul.trim(), &body.isi, version)? {
        return Err(AppError::Conflict(
            "versi tidak cocok, muat ulang notulensi terbaru".to_string(),
        ));
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "notulensi.updated",
        "notulensi",
        id,
        serde_json::json!({ "version": version + 1 }),
    );

    let hasil = notulensi::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(hasil))
}

/// PUT /api/notulensi/{id}/status - Walk the approval workflow.
/// Submitting is for the author (or an admin); approval and rejection
/// are admin decisions; a rejected document goes back to draft for
/// revision.
pub async fn update_status(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<StatusRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;

    let tujuan = StatusNotulensi::from_str(&body.status)
        .ok_or_else(|| AppError::Validation(format!("status '{}' tidak dikenal", body.status)))?;
    if let Some(err) = validate::validate_optional(&body.catatan, "catatan", 2000) {
        return Err(AppError::Validation(err));
    }

    let id = path.into_inner();
    let conn = pool.get()?;
    let muatan = notulensi::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    if !StatusNotulensi::can_transition(muatan.status, tujuan) {
        return Err(AppError::Validation(format!(
            "transisi dari {} ke {} tidak diizinkan",
            muatan.status.as_str(),
            tujuan.as_str()
        )));
    }

    let (aksi, catatan) = match tujuan {
        StatusNotulensi::PendingApproval => {
            if !who.is_admin() && muatan.dibuat_oleh != who.id {
                return Err(AppError::Forbidden("bukan pembuat notulensi".to_string()));
            }
            ("notulensi.submitted", muatan.catatan_reviewer.as_str())
        }
        StatusNotulensi::Approved => {
            who.require_admin()?;
            ("notulensi.approved", body.catatan.trim())
        }
        StatusNotulensi::Rejected => {
            who.require_admin()?;
            ("notulensi.rejected", body.catatan.trim())
        }
        StatusNotulensi::Draft => {
            if !who.is_admin() && muatan.dibuat_oleh != who.id {
                return Err(AppError::Forbidden("bukan pembuat notulensi".to_string()));
            }
            // The reviewer's note stays visible while the author revises.
            ("notulensi.revised", muatan.catatan_reviewer.as_str())
        }
    };

    notulensi::update_status(&conn, id, tujuan, catatan)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        aksi,
        "notulensi",
        id,
        serde_json::json!({ "dari": muatan.status.as_str(), "ke": tujuan.as_str() }),
    );

    let hasil = notulensi::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(hasil))
}
