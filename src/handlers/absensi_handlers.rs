use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{principal, validate};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::status::{StatusKehadiran, StatusSesi};
use crate::models::{absensi, peserta, sesi};

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub status: String,
    #[serde(default)]
    pub keterangan: String,
}

#[derive(Debug, Deserialize)]
pub struct OverrideRequest {
    pub peserta_id: i64,
    pub status: String,
    #[serde(default)]
    pub keterangan: String,
}

#[derive(Debug, Deserialize)]
pub struct BulkRequest {
    pub entri: Vec<OverrideRequest>,
}

#[derive(Debug, Serialize)]
struct BulkFailure {
    peserta_id: i64,
    alasan: String,
}

fn parse_status(raw: &str) -> Result<StatusKehadiran, AppError> {
    StatusKehadiran::from_str(raw)
        .ok_or_else(|| AppError::Validation(format!("status kehadiran '{raw}' tidak dikenal")))
}

fn buat_laporan(
    conn: &rusqlite::Connection,
    dimuat: &sesi::Sesi,
) -> rusqlite::Result<absensi::LaporanAbsensi> {
    let daftar = sesi::roster::resolve(conn, dimuat)?;
    let records = absensi::find_by_sesi(conn, dimuat.id)?;
    Ok(absensi::aggregate::resolve(&daftar, &records))
}

/// GET /api/sesi/{id}/absensi - Aggregated report: one resolved status
/// per roster participant, the counts, and any out-of-roster records.
pub async fn report(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let conn = pool.get()?;
    let dimuat = sesi::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let laporan = buat_laporan(&conn, &dimuat)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "sesi_id": dimuat.id,
        "sesi_nama": dimuat.nama,
        "entri": laporan.entri,
        "rekap": laporan.rekap,
        "luar_daftar": laporan.luar_daftar,
    })))
}

/// POST /api/sesi/{id}/absensi - Self check-in while the session runs.
/// `ghoib` cannot be self-claimed; it only ever appears by default or
/// through an override. Check-ins from outside the effective roster are
/// stored anyway and the report lists them separately.
pub async fn check_in(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<CheckInRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;

    let status = parse_status(&body.status)?;
    if !status.self_submittable() {
        return Err(AppError::Validation(
            "status ghoib tidak dapat diisi sendiri".to_string(),
        ));
    }
    if let Some(err) = validate::validate_optional(&body.keterangan, "keterangan", 500) {
        return Err(AppError::Validation(err));
    }

    let sesi_id = path.into_inner();
    let conn = pool.get()?;
    let dimuat = sesi::find_by_id(&conn, sesi_id)?.ok_or(AppError::NotFound)?;
    if dimuat.status != StatusSesi::Active {
        return Err(AppError::Validation(
            "absensi mandiri hanya saat sesi berlangsung".to_string(),
        ));
    }

    absensi::upsert(&conn, sesi_id, who.id, status, body.keterangan.trim(), false, who.id)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "absensi.submitted",
        "sesi",
        sesi_id,
        serde_json::json!({ "status": status.as_str() }),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Kehadiran tercatat",
        "status": status,
        "status_label": status.label(),
    })))
}

/// POST /api/sesi/{id}/absensi/override - Admin correction for one
/// participant. Wins over any self submission regardless of order.
pub async fn record_override(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<OverrideRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_admin()?;

    let status = parse_status(&body.status)?;
    if let Some(err) = validate::validate_optional(&body.keterangan, "keterangan", 500) {
        return Err(AppError::Validation(err));
    }

    let sesi_id = path.into_inner();
    let conn = pool.get()?;
    sesi::find_by_id(&conn, sesi_id)?.ok_or(AppError::NotFound)?;
    if peserta::find_display_by_id(&conn, body.peserta_id)?.is_none() {
        return Err(AppError::Validation(format!(
            "peserta {} tidak ditemukan",
            body.peserta_id
        )));
    }

    absensi::upsert(
        &conn,
        sesi_id,
        body.peserta_id,
        status,
        body.keterangan.trim(),
        true,
        who.id,
    )?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "absensi.overridden",
        "sesi",
        sesi_id,
        serde_json::json!({ "peserta_id": body.peserta_id, "status": status.as_str() }),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Status kehadiran dikoreksi",
        "peserta_id": body.peserta_id,
        "status": status,
    })))
}

/// POST /api/sesi/{id}/absensi/bulk - Admin marks many participants in
/// one call. Reports per-entry outcomes instead of aborting the batch.
pub async fn bulk(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<BulkRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_admin()?;

    if body.entri.is_empty() {
        return Err(AppError::Validation("entri tidak boleh kosong".to_string()));
    }

    let sesi_id = path.into_inner();
    let conn = pool.get()?;
    sesi::find_by_id(&conn, sesi_id)?.ok_or(AppError::NotFound)?;

    let mut berhasil = 0i64;
    let mut gagal: Vec<BulkFailure> = Vec::new();
    for entri in &body.entri {
        let status = match StatusKehadiran::from_str(&entri.status) {
            Some(s) => s,
            None => {
                gagal.push(BulkFailure {
                    peserta_id: entri.peserta_id,
                    alasan: format!("status '{}' tidak dikenal", entri.status),
                });
                continue;
            }
        };
        if peserta::find_display_by_id(&conn, entri.peserta_id)?.is_none() {
            gagal.push(BulkFailure {
                peserta_id: entri.peserta_id,
                alasan: "peserta tidak ditemukan".to_string(),
            });
            continue;
        }
        absensi::upsert(
            &conn,
            sesi_id,
            entri.peserta_id,
            status,
            entri.keterangan.trim(),
            true,
            who.id,
        )?;
        berhasil += 1;
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "absensi.bulk_recorded",
        "sesi",
        sesi_id,
        serde_json::json!({ "berhasil": berhasil, "gagal": gagal.len() }),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "berhasil": berhasil,
        "gagal": gagal,
    })))
}

fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// GET /api/sesi/{id}/absensi/export - The resolved report as CSV.
pub async fn export_csv(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;

    let conn = pool.get()?;
    let dimuat = sesi::find_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let laporan = buat_laporan(&conn, &dimuat)?;

    let mut csv = String::from("Nama,Bidang,Status,Keterangan,Sumber\n");
    for entri in &laporan.entri {
        let sumber = match entri.sumber {
            absensi::SumberStatus::Override => "override",
            absensi::SumberStatus::Mandiri => "mandiri",
            absensi::SumberStatus::Default => "default",
        };
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            csv_escape(&entri.nama),
            csv_escape(&entri.bidang),
            csv_escape(entri.status_label.as_str()),
            csv_escape(&entri.keterangan),
            sumber,
        ));
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "absensi.exported",
        "sesi",
        dimuat.id,
        serde_json::json!({ "format": "csv", "baris": laporan.entri.len() }),
    );

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"absensi-sesi-{}.csv\"", dimuat.id),
        ))
        .body(csv))
}
