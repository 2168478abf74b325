use actix_session::Session;
use actix_web::{web, HttpResponse};
use chrono::{Datelike, Local};

use crate::auth::principal;
use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::dashboard;

/// GET /api/dashboard - Counts for the landing page plus the latest
/// audit entries.
pub async fn summary(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    principal::resolve(&session)?;

    let sekarang = Local::now();
    let hari_ini = sekarang.format("%Y-%m-%d").to_string();

    let conn = pool.get()?;
    let ringkasan = dashboard::summarize(&conn, &hari_ini, sekarang.year() as i64)?;
    Ok(HttpResponse::Ok().json(ringkasan))
}
