use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Role, StaffPatch, StaffProfile, User, UserWithStaff};
use crate::state::AppState;

// GET /staff
pub async fn list_staff(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let db = state.db.lock().unwrap();
    let business = state.tenant.resolve(&db)?;

    let staff = queries::list_staff(&db, &business.id)?;
    Ok(Json(serde_json::json!({ "ok": true, "staff": staff })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaffBody {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub phone: Option<String>,
}

// POST /staff
pub async fn create_staff(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateStaffBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut db = state.db.lock().unwrap();
    let business = state.tenant.resolve(&db)?;

    let email = body.email.filter(|s| !s.is_empty());
    let display_name = body.display_name.filter(|s| !s.is_empty());
    let (Some(email), Some(display_name)) = (email, display_name) else {
        return Err(AppError::Validation(
            "email and displayName required".to_string(),
        ));
    };

    let now = Utc::now().naive_utc();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        business_id: business.id.clone(),
        email,
        name: None,
        role: Role::Staff,
        created_at: now,
    };
    let staff = StaffProfile {
        id: uuid::Uuid::new_v4().to_string(),
        business_id: business.id.clone(),
        user_id: user.id.clone(),
        display_name,
        phone: body.phone,
        is_active: true,
        sort_order: 0,
        created_at: now,
    };

    // Duplicate emails hit the unique constraint and surface as a plain
    // storage error; no distinguished "already exists" kind.
    queries::create_user_with_staff(&mut db, &user, &staff)?;

    Ok(Json(serde_json::json!({
        "ok": true,
        "user": UserWithStaff { user, staff },
    })))
}

// PATCH /staff/:id
pub async fn patch_staff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<StaffPatch>,
) -> Result<Json<serde_json::Value>, AppError> {
    let db = state.db.lock().unwrap();

    let staff = queries::update_staff(&db, &id, &patch)?
        .ok_or_else(|| AppError::NotFound(format!("staff {id}")))?;

    Ok(Json(serde_json::json!({ "ok": true, "staff": staff })))
}
