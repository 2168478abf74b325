use actix_session::Session;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::status::Role;

/// The signed-in principal for the current request.
///
/// Resolved once from the cookie session and passed explicitly into any
/// call that needs an actor; the browser may mirror this descriptor into
/// local storage for menu filtering, but authorization decisions are only
/// ever made from this server-side copy.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub id: i64,
    pub nama: String,
    pub role: Role,
    pub bidang: String,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn is_pengurus(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Pengurus)
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden("perlu role admin".to_string()))
        }
    }

    pub fn require_pengurus(&self) -> Result<(), AppError> {
        if self.is_pengurus() {
            Ok(())
        } else {
            Err(AppError::Forbidden("perlu role pengurus".to_string()))
        }
    }
}

/// Write the principal into the session after a successful login.
pub fn store(session: &Session, principal: &Principal) {
    let _ = session.insert("user_id", principal.id);
    let _ = session.insert("nama", &principal.nama);
    let _ = session.insert("role", principal.role.as_str());
    let _ = session.insert("bidang", &principal.bidang);
}

/// Resolve the principal for this request, or `Unauthorized` if nobody is
/// signed in.
pub fn resolve(session: &Session) -> Result<Principal, AppError> {
    let id = session
        .get::<i64>("user_id")
        .unwrap_or(None)
        .ok_or(AppError::Unauthorized)?;
    let nama = session.get::<String>("nama").unwrap_or(None).unwrap_or_default();
    let role = session
        .get::<String>("role")
        .unwrap_or(None)
        .as_deref()
        .and_then(Role::from_str)
        .unwrap_or(Role::Peserta);
    let bidang = session
        .get::<String>("bidang")
        .unwrap_or(None)
        .unwrap_or_default();
    Ok(Principal { id, nama, role, bidang })
}

pub fn clear(session: &Session) {
    session.purge();
}
