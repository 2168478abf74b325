use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{principal, validate};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::program_kerja::{self, rollup};

#[derive(Debug, Deserialize)]
pub struct KegiatanRequest {
    pub tahun: i64,
    pub bidang: String,
    pub bulan: i64,
    pub nama: String,
    #[serde(default)]
    pub tujuan: String,
}

#[derive(Debug, Deserialize)]
pub struct RincianRequest {
    pub nama_item: String,
    pub jumlah: i64,
    pub harga_satuan: i64,
    #[serde(default = "default_satu")]
    pub hari: i64,
    #[serde(default = "default_satu")]
    pub frekuensi: i64,
}

fn default_satu() -> i64 {
    1
}

fn validate_kegiatan(body: &KegiatanRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_tahun(body.tahun));
    errors.extend(validate::validate_required(&body.bidang, "bidang", 100));
    errors.extend(validate::validate_bulan(body.bulan));
    errors.extend(validate::validate_required(&body.nama, "nama", 200));
    errors.extend(validate::validate_optional(&body.tujuan, "tujuan", 2000));
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors.join("; ")))
    }
}

fn validate_rincian(body: &RincianRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&body.nama_item, "nama_item", 200));
    errors.extend(validate::validate_non_negatif(body.jumlah, "jumlah"));
    errors.extend(validate::validate_non_negatif(body.harga_satuan, "harga_satuan"));
    errors.extend(validate::validate_non_negatif(body.hari, "hari"));
    errors.extend(validate::validate_non_negatif(body.frekuensi, "frekuensi"));
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors.join("; ")))
    }
}

fn tahun_param(query: &HashMap<String, String>) -> Result<i64, AppError> {
    query
        .get("tahun")
        .and_then(|t| t.parse::<i64>().ok())
        .ok_or_else(|| AppError::Validation("parameter tahun wajib diisi".to_string()))
}

/// GET /api/program-kerja/kegiatan - Activities of one program year
/// Query params: tahun (required), bidang
pub async fn list_kegiatan(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let tahun = tahun_param(&query)?;
    let bidang = query.get("bidang").map(String::as_str).filter(|b| !b.is_empty());

    let conn = pool.get()?;
    let daftar = program_kerja::find_kegiatan(&conn, tahun, bidang)?;
    Ok(HttpResponse::Ok().json(daftar))
}

/// GET /api/program-kerja/kegiatan/{id} - Activity with its cost lines
/// and derived total.
pub async fn read_kegiatan(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let conn = pool.get()?;
    let kegiatan =
        program_kerja::find_kegiatan_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    let rincian = program_kerja::find_rincian_by_kegiatan(&conn, kegiatan.id)?;
    let total = rollup::total_kegiatan(&rincian);
    let detail = program_kerja::KegiatanDetail {
        kegiatan,
        rincian: rincian.iter().map(rollup::to_display).collect(),
        total,
    };
    Ok(HttpResponse::Ok().json(detail))
}

/// POST /api/program-kerja/kegiatan (pengurus)
pub async fn create_kegiatan(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<KegiatanRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    validate_kegiatan(&body)?;

    let baru = program_kerja::NewKegiatan {
        tahun: body.tahun,
        bidang: body.bidang.trim().to_string(),
        bulan: body.bulan,
        nama: body.nama.trim().to_string(),
        tujuan: body.tujuan.trim().to_string(),
    };
    let conn = pool.get()?;
    let id = program_kerja::create_kegiatan(&conn, &baru)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "kegiatan.created",
        "kegiatan",
        id,
        serde_json::json!({ "tahun": baru.tahun, "bidang": baru.bidang, "nama": baru.nama }),
    );

    let dibuat = program_kerja::find_kegiatan_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(dibuat))
}

/// PUT /api/program-kerja/kegiatan/{id} (pengurus)
pub async fn update_kegiatan(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<KegiatanRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    validate_kegiatan(&body)?;

    let id = path.into_inner();
    let upd = program_kerja::NewKegiatan {
        tahun: body.tahun,
        bidang: body.bidang.trim().to_string(),
        bulan: body.bulan,
        nama: body.nama.trim().to_string(),
        tujuan: body.tujuan.trim().to_string(),
    };
    let conn = pool.get()?;
    if !program_kerja::update_kegiatan(&conn, id, &upd)? {
        return Err(AppError::NotFound);
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "kegiatan.updated",
        "kegiatan",
        id,
        serde_json::json!({ "nama": upd.nama }),
    );

    let hasil = program_kerja::find_kegiatan_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(hasil))
}

/// DELETE /api/program-kerja/kegiatan/{id} (pengurus). Cost lines go
/// with the activity.
pub async fn delete_kegiatan(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;

    let id = path.into_inner();
    let conn = pool.get()?;
    if !program_kerja::delete_kegiatan(&conn, id)? {
        return Err(AppError::NotFound);
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "kegiatan.deleted",
        "kegiatan",
        id,
        serde_json::json!({}),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Kegiatan dihapus" })))
}

/// POST /api/program-kerja/kegiatan/{id}/rincian (pengurus)
pub async fn create_rincian(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<RincianRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    validate_rincian(&body)?;

    let kegiatan_id = path.into_inner();
    let conn = pool.get()?;
    program_kerja::find_kegiatan_by_id(&conn, kegiatan_id)?.ok_or(AppError::NotFound)?;

    let baru = program_kerja::NewRincian {
        nama_item: body.nama_item.trim().to_string(),
        jumlah: body.jumlah,
        harga_satuan: body.harga_satuan,
        hari: body.hari,
        frekuensi: body.frekuensi,
    };
    let id = program_kerja::create_rincian(&conn, kegiatan_id, &baru)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "rincian.created",
        "rincian_biaya",
        id,
        serde_json::json!({ "kegiatan_id": kegiatan_id, "nama_item": baru.nama_item }),
    );

    let dibuat = program_kerja::find_rincian_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(rollup::to_display(&dibuat)))
}

/// PUT /api/program-kerja/rincian/{id} (pengurus)
pub async fn update_rincian(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<RincianRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    validate_rincian(&body)?;

    let id = path.into_inner();
    let conn = pool.get()?;
    let lama = program_kerja::find_rincian_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    let upd = program_kerja::NewRincian {
        nama_item: body.nama_item.trim().to_string(),
        jumlah: body.jumlah,
        harga_satuan: body.harga_satuan,
        hari: body.hari,
        frekuensi: body.frekuensi,
    };
    program_kerja::update_rincian(&conn, id, &upd)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "rincian.updated",
        "rincian_biaya",
        id,
        serde_json::json!({ "kegiatan_id": lama.kegiatan_id, "nama_item": upd.nama_item }),
    );

    let hasil = program_kerja::find_rincian_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(rollup::to_display(&hasil)))
}

/// DELETE /api/program-kerja/rincian/{id} (pengurus)
pub async fn delete_rincian(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;

    let id = path.into_inner();
    let conn = pool.get()?;
    let lama = program_kerja::find_rincian_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    program_kerja::delete_rincian(&conn, id)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "rincian.deleted",
        "rincian_biaya",
        id,
        serde_json::json!({ "kegiatan_id": lama.kegiatan_id }),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Rincian biaya dihapus" })))
}

/// GET /api/program-kerja/rekap - Roll one year up to activity, month,
/// field and annual totals
/// Query params: tahun (required), bidang
pub async fn rekap(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let tahun = tahun_param(&query)?;
    let bidang = query.get("bidang").map(String::as_str).filter(|b| !b.is_empty());

    let conn = pool.get()?;
    let items = program_kerja::find_kegiatan_with_rincian(&conn, tahun, bidang)?;
    Ok(HttpResponse::Ok().json(rollup::rollup(tahun, &items)))
}
