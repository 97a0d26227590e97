use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Service, ServicePatch};
use crate::state::AppState;

// GET /services
pub async fn list_services(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let db = state.db.lock().unwrap();
    let business = state.tenant.resolve(&db)?;

    let services = queries::list_services_with_staff(&db, &business.id)?;
    Ok(Json(serde_json::json!({ "ok": true, "services": services })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceBody {
    pub name: Option<String>,
    pub description: Option<String>,
    pub duration_min: Option<i64>,
    pub price_cents: Option<i64>,
    pub deposit_cents: Option<i64>,
    pub buffer_before_min: Option<i64>,
    pub buffer_after_min: Option<i64>,
    pub is_active: Option<bool>,
    pub is_public: Option<bool>,
    #[serde(default)]
    pub staff_ids: Vec<String>,
}

// POST /services
pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateServiceBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut db = state.db.lock().unwrap();
    let business = state.tenant.resolve(&db)?;

    // A price of 0 is a provided value; only a missing key fails validation.
    // Duration must be a positive number of minutes.
    let name = body.name.filter(|s| !s.is_empty());
    let duration_min = body.duration_min.filter(|d| *d > 0);
    let (Some(name), Some(duration_min), Some(price_cents)) =
        (name, duration_min, body.price_cents)
    else {
        return Err(AppError::Validation(
            "name, durationMin, priceCents required".to_string(),
        ));
    };

    let service = Service {
        id: uuid::Uuid::new_v4().to_string(),
        business_id: business.id.clone(),
        name,
        description: body.description,
        duration_min,
        price_cents,
        deposit_cents: body.deposit_cents.unwrap_or(0),
        buffer_before_min: body.buffer_before_min.unwrap_or(0),
        buffer_after_min: body.buffer_after_min.unwrap_or(0),
        is_active: body.is_active.unwrap_or(true),
        is_public: body.is_public.unwrap_or(true),
        created_at: Utc::now().naive_utc(),
    };
    queries::create_service_with_links(&mut db, &service, &body.staff_ids)?;

    let hydrated = queries::get_service_with_staff(&db, &business.id, &service.id)?
        .ok_or_else(|| AppError::NotFound(format!("service {}", service.id)))?;

    Ok(Json(serde_json::json!({ "ok": true, "service": hydrated })))
}

// PATCH /services/:id
//
// Two updates in one call: a sparse patch of the scalar fields, and (only
// when `staffIds` is present) a replace-all of the staff links. Both are
// committed together, and the response is the re-fetched hydrated service.
pub async fn patch_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<ServicePatch>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut db = state.db.lock().unwrap();
    let business = state.tenant.resolve(&db)?;

    let updated = queries::update_service(&mut db, &business.id, &id, &patch)?;
    if !updated {
        return Err(AppError::NotFound(format!("service {id}")));
    }

    let service = queries::get_service_with_staff(&db, &business.id, &id)?
        .ok_or_else(|| AppError::NotFound(format!("service {id}")))?;

    Ok(Json(serde_json::json!({ "ok": true, "service": service })))
}
