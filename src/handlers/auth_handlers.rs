use actix_session::Session;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::rate_limit::RateLimiter;
use crate::auth::{password, principal};
use crate::db::DbPool;
use crate::errors::{AppError, ErrorBody};
use crate::models::peserta;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login
///
/// Failures are answered uniformly so the response does not reveal
/// whether the username exists.
pub async fn login(
    pool: web::Data<DbPool>,
    limiter: web::Data<RateLimiter>,
    session: Session,
    req: HttpRequest,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let peer_ip = req.peer_addr().map(|addr| addr.ip());

    if let Some(ip) = peer_ip {
        if limiter.is_blocked(ip) {
            log::warn!("login blocked by rate limiter for {ip}");
            return Ok(HttpResponse::TooManyRequests().json(ErrorBody::new(
                "Terlalu banyak percobaan login, coba lagi nanti",
            )));
        }
    }

    let gagal = || {
        HttpResponse::Unauthorized().json(ErrorBody::new("Username atau password salah"))
    };

    let conn = pool.get()?;
    let akun = match peserta::find_by_username(&conn, body.username.trim())? {
        Some(p) => p,
        None => {
            if let Some(ip) = peer_ip {
                limiter.record_failure(ip);
            }
            return Ok(gagal());
        }
    };

    let cocok = password::verify_password(&body.password, &akun.password)
        .map_err(AppError::Hash)?;
    if !cocok || !akun.aktif {
        if let Some(ip) = peer_ip {
            limiter.record_failure(ip);
        }
        return Ok(gagal());
    }

    if let Some(ip) = peer_ip {
        limiter.clear(ip);
    }

    let who = principal::Principal {
        id: akun.id,
        nama: akun.nama,
        role: akun.role,
        bidang: akun.bidang,
    };
    principal::store(&session, &who);

    let _ = crate::audit::log(
        &conn,
        who.id,
        "auth.login",
        "peserta",
        who.id,
        serde_json::json!({ "username": akun.username }),
    );

    Ok(HttpResponse::Ok().json(who))
}

/// POST /api/auth/logout
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    principal::clear(&session);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Berhasil keluar" })))
}

/// GET /api/auth/me
pub async fn me(session: Session) -> Result<HttpResponse, AppError> {
    let who = principal::resolve(&session)?;
    Ok(HttpResponse::Ok().json(who))
}
