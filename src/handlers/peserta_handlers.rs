use std::collections::HashMap;

use actix_session::Session;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::auth::{password, principal, validate};
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::peserta;
use crate::models::status::Role;

#[derive(Debug, Deserialize)]
pub struct PesertaRequest {
    pub nama: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: String,
    pub bidang: String,
    #[serde(default = "default_aktif")]
    pub aktif: bool,
}

fn default_aktif() -> bool {
    true
}

fn parse_role(raw: &str, errors: &mut Vec<String>) -> Role {
    match Role::from_str(raw) {
        Some(role) => role,
        None => {
            errors.push(format!("role '{raw}' tidak dikenal"));
            Role::Peserta
        }
    }
}

/// GET /api/peserta - List participants
/// Query params: bidang, aktif=1 to hide deactivated accounts
pub async fn list(
    pool: web::Data<DbPool>,
    session: Session,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let bidang = query.get("bidang").map(String::as_str).filter(|b| !b.is_empty());
    let hanya_aktif = matches!(query.get("aktif").map(String::as_str), Some("1") | Some("true"));

    let conn = pool.get()?;
    let daftar = peserta::find_all(&conn, bidang, hanya_aktif)?;
    Ok(HttpResponse::Ok().json(daftar))
}

/// GET /api/peserta/{id}
pub async fn read(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let conn = pool.get()?;
    let ditemukan =
        peserta::find_display_by_id(&conn, path.into_inner())?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ditemukan))
}

/// POST /api/peserta - Create participant (admin)
pub async fn create(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<PesertaRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_admin()?;

    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&body.nama, "nama", 200));
    let username = body.username.clone().unwrap_or_default();
    errors.extend(validate::validate_username(&username));
    match &body.password {
        Some(pwd) => errors.extend(validate::validate_password(pwd)),
        None => errors.push("password wajib diisi saat membuat peserta".to_string()),
    }
    errors.extend(validate::validate_optional(&body.bidang, "bidang", 100));
    let role = parse_role(&body.role, &mut errors);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join("; ")));
    }

    let conn = pool.get()?;
    if peserta::username_exists(&conn, username.trim())? {
        return Err(AppError::Validation("username sudah digunakan".to_string()));
    }

    let hash = password::hash_password(body.password.as_deref().unwrap_or_default())
        .map_err(AppError::Hash)?;
    let baru = peserta::NewPeserta {
        nama: body.nama.trim().to_string(),
        username: username.trim().to_string(),
        password: hash,
        role,
        bidang: body.bidang.trim().to_string(),
    };
    let id = peserta::create(&conn, &baru)?;

    let _ = crate::audit::log(
        &conn,
        who.id,
        "peserta.created",
        "peserta",
        id,
        serde_json::json!({ "username": baru.username, "role": baru.role.as_str(), "bidang": baru.bidang }),
    );

    let dibuat = peserta::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Created().json(dibuat))
}

/// PUT /api/peserta/{id} - Edit name, role, field and active flag (admin).
/// Username is fixed after creation; a supplied password is re-hashed,
/// an absent one leaves the credential alone.
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Json<PesertaRequest>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_admin()?;

    let id = path.into_inner();
    let conn = pool.get()?;
    peserta::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;

    let mut errors = Vec::new();
    errors.extend(validate::validate_required(&body.nama, "nama", 200));
    errors.extend(validate::validate_optional(&body.bidang, "bidang", 100));
    let role = parse_role(&body.role, &mut errors);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors.join("; ")));
    }

    let upd = peserta::PesertaUpdate {
        nama: body.nama.trim().to_string(),
        role,
        bidang: body.bidang.trim().to_string(),
        aktif: body.aktif,
    };
    peserta::update(&conn, id, &upd)?;

    if let Some(pwd) = &body.password {
        if let Some(err) = validate::validate_password(pwd) {
            return Err(AppError::Validation(err));
        }
        let hash = password::hash_password(pwd).map_err(AppError::Hash)?;
        peserta::update_password(&conn, id, &hash)?;
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "peserta.updated",
        "peserta",
        id,
        serde_json::json!({ "role": upd.role.as_str(), "bidang": upd.bidang, "aktif": upd.aktif }),
    );

    let hasil = peserta::find_display_by_id(&conn, id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(hasil))
}

/// DELETE /api/peserta/{id} - Soft deactivate (admin). The account drops
/// out of every roster but its history stays.
pub async fn deactivate(
    pool: web::Data<DbPool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    who.require_admin()?;

    let id = path.into_inner();
    if id == who.id {
        return Err(AppError::Validation(
            "tidak dapat menonaktifkan akun sendiri".to_string(),
        ));
    }

    let conn = pool.get()?;
    if !peserta::deactivate(&conn, id)? {
        return Err(AppError::NotFound);
    }

    let _ = crate::audit::log(
        &conn,
        who.id,
        "peserta.deactivated",
        "peserta",
        id,
        serde_json::json!({}),
    );

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Peserta dinonaktifkan" })))
}
