use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

/// JSON body carried by every non-2xx response.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    Hash(String),
    NotFound,
    Unauthorized,
    Forbidden(String),
    Validation(String),
    Conflict(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::NotFound => write!(f, "Not found"),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Forbidden(what) => write!(f, "Forbidden: {what}"),
            AppError::Validation(msg) => write!(f, "Validation failed: {msg}"),
            AppError::Conflict(msg) => write!(f, "Conflict: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => {
                HttpResponse::NotFound().json(ErrorBody::new("Data tidak ditemukan"))
            }
            AppError::Unauthorized => {
                HttpResponse::Unauthorized().json(ErrorBody::new("Belum masuk, silakan login"))
            }
            AppError::Forbidden(what) => HttpResponse::Forbidden()
                .json(ErrorBody::with_details("Akses ditolak", what.clone())),
            AppError::Validation(msg) => HttpResponse::BadRequest()
                .json(ErrorBody::with_details("Validasi gagal", msg.clone())),
            AppError::Conflict(msg) => HttpResponse::Conflict()
                .json(ErrorBody::with_details("Konflik data", msg.clone())),
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(ErrorBody::new("Terjadi kesalahan pada server"))
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}
