use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{principal, validate};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::file_link;

#[derive(Debug, Deserialize)]
pub struct FileLinkRequest {
    pub judul: String,
    pub url: String,
    #[serde(default)]
    pub kategori: String,
    #[serde(default)]
    pub deskripsi: String,
}

fn validate_link(body: &FileLinkRequest) -> Result<(), AppError> {
    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&body.judul, "judul", 200));
    errors.extend(validate::validate_url(&body.url, "url"));
    errors.extend(validate::validate_optional(&body.kategori, "kategori", 100));
    errors.extend(validate::validate_optional(&body.deskripsi, "deskripsi", 1000));
    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors.join("; ")))
    }
}

fn to_new_link(body: &FileLinkRequest) -> file_link::NewFileLink {
    file_link::NewFileLink {
        judul: body.judul.trim().to_string(),
        url: body.url.trim().to_string(),
        kategori: body.kategori.trim().to_string(),
        deskripsi: body.deskripsi.trim().to_string(),
    }
}

/// GET /api/file-link - List catalogued document links
/// Query params: kategori
pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let kategori = query.get("kategori").map(String::as_str).filter(|k| !k.is_empty());

    let conn = pool.get()?;
    let daftar = file_link::find_all(&conn, kategori)?;
    Ok(HttpResponse::Ok().json(daftar))
}

/// POST /api/file-link (pengurus). Metadata and URL only, the bytes
/// live wherever the link points.
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<FileLinkRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    validate_link(&body)?;

    let conn = pool.get()?;
    let id = file_link::create(&conn, &to_new_link(&body), who.id)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "file_link.created",
        "file_link",
        id,
        serde_json::json!({ "judul": body.judul.trim(), "kategori": body.kategori.trim() }),
    );

    let dibuat = file_link::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(dibuat))
}

/// PUT /api/file-link/{id} (pengurus)
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<FileLinkRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;
    validate_link(&body)?;

    let id = path.into_inner();
    let conn = pool.get()?;
    if !file_link::update(&conn, id, &to_new_link(&body))? {
        return Err(AppError::NotFound);
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "file_link.updated",
        "file_link",
        id,
        serde_json::json!({ "judul": body.judul.trim() }),
    );

    let hasil = file_link::find_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(hasil))
}

/// DELETE /api/file-link/{id} (pengurus)
pub async fn delete(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_pengurus()?;

    let id = path.into_inner();
    let conn = pool.get()?;
    if !file_link::delete(&conn, id)? {
        return Err(AppError::NotFound);
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "file_link.deleted",
        "file_link",
        id,
        serde_json::json!({}),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Tautan dihapus" })))
}
