use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Business;

/// Resolves the Business a request operates on.
///
/// The deployment is single-tenant for now, so the default resolver just
/// picks the first (and only) Business row. Kept behind a trait so a real
/// per-request resolver (session, hostname) can replace it without touching
/// handler code.
pub trait TenantResolver: Send + Sync {
    fn resolve(&self, conn: &Connection) -> Result<Business, AppError>;
}

pub struct FirstBusinessResolver;

impl TenantResolver for FirstBusinessResolver {
    fn resolve(&self, conn: &Connection) -> Result<Business, AppError> {
        queries::find_first_business(conn)?.ok_or(AppError::MissingBusiness)
    }
}
