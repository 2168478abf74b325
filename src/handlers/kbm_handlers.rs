use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{principal, validate};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::kbm::{self, rollup};

#[derive(Debug, Deserialize)]
pub struct KbmRequest {
    pub desa: String,
    pub kelompok: String,
    pub periode: String,
    pub kategori_program: String,
    pub jumlah_siswa: i64,
    pub jumlah_hadir: i64,
    /// Optional; when absent it is derived from the two counts.
    pub persentase_kehadiran: Option<i64>,
    #[serde(default)]
    pub keterangan: String,
}

fn validate_laporan(body: &KbmRequest) -> Result<i64, AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&body.desa, "desa", 100));
    errors.extend(validate::validate_required(&body.kelompok, "kelompok", 100));
    errors.extend(validate::validate_periode(&body.periode, "periode"));
    errors.extend(validate::validate_required(
        &body.kategori_program,
        "kategori_program",
        100,
    ));
    errors.extend(validate::validate_non_negatif(body.jumlah_siswa, "jumlah_siswa"));
    errors.extend(validate::validate_non_negatif(body.jumlah_hadir, "jumlah_hadir"));
    if body.jumlah_hadir > body.jumlah_siswa {
        errors.push("jumlah_hadir tidak boleh melebihi jumlah_siswa".to_string());
    }
    if let Some(p) = body.persentase_kehadiran {
        errors.extend(validate::validate_persentase(p, "persentase_kehadiran"));
    }
    errors.extend(validate::validate_optional(&body.keterangan, "keterangan", 1000));
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join("; ")));
    }
    Ok(body
        .persentase_kehadiran
        .unwrap_or_else(|| rollup::persentase(body.jumlah_hadir, body.jumlah_siswa)))
}

fn to_new_laporan(body: &KbmRequest, persentase: i64) -> kbm::NewLaporanKbm {
    kbm::NewLaporanKbm {
        desa: body.desa.trim().to_string(),
        kelompok: body.kelompok.trim().to_string(),
        periode: body.periode.trim().to_string(),
        kategori_program: body.kategori_program.trim().to_string(),
        jumlah_siswa: body.jumlah_siswa,
        jumlah_hadir: body.jumlah_hadir,
        persentase_kehadiran: persentase,
        keterangan: body.keterangan.trim().to_string(),
    }
}

/// GET /api/kbm - List learning reports
/// Query params: desa, periode (YYYY-MM)
pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let desa = query.get("desa").map(String::as_str).filter(|d| !d.is_empty());
    let periode = query.get("periode").map(String::as_str).filter(|p| !p.is_empty());

    let conn = pool.get()?;
    let daftar = kbm::find_all(&conn, desa, periode)?;
    Ok(HttpResponse::Ok().json(daftar))
}

/// POST /api/kbm - Submit a monthly report (pengurus). Re-submitting
/// the same village, group, period and category replaces the counts.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<KbmRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    let persentase = validate_laporan(&body)?;

    let baru = to_new_laporan(&body, persentase);
    let conn = pool.get()?;
    let id = kbm::upsert(&conn, &baru)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "kbm.reported",
        "laporan_kbm",
        id,
        serde_json::json!({
            "desa": baru.desa,
            "kelompok": baru.kelompok,
            "periode": baru.periode,
            "kategori_program": baru.kategori_program,
        }),
    );

    let dibuat = kbm::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(dibuat))
}

/// PUT /api/kbm/{id} (pengurus)
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<KbmRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    let persentase = validate_laporan(&body)?;

    let id = path.into_inner();
    let conn = pool.get()?;
    if !kbm::update(&conn, id, &to_new_laporan(&body, persentase))? {
        return Err(AppError::NotFound);
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "kbm.updated",
        "laporan_kbm",
        id,
        serde_json::json!({ "periode": body.periode.trim() }),
    );

    let hasil = kbm::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(hasil))
}

/// DELETE /api/kbm/{id} (pengurus)
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;

    let id = path.into_inner();
    let conn = pool.get()?;
    if !kbm::delete(&conn, id)? {
        return Err(AppError::NotFound);
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "kbm.deleted",
        "laporan_kbm",
        id,
        serde_json::json!({}),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Laporan KBM dihapus" })))
}

/// GET /api/kbm/rekap - Village and category rollups over the filtered
/// reports
/// Query params: desa, periode (YYYY-MM)
pub async fn rekap(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let desa = query.get("desa").map(String::as_str).filter(|d| !d.is_empty());
    let periode = query.get("periode").map(String::as_str).filter(|p| !p.is_empty());

    let conn = pool.get()?;
    let rows = kbm::find_all(&conn, desa, periode)?;
    Ok(HttpResponse::Ok().json(rollup::rekap(&rows)))
}
