use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Business, Role, StaffProfile, User, UserWithStaff};
use crate::state::AppState;

// POST /bootstrap
//
// One-time setup for a fresh database: creates the demo business plus an
// owner User/StaffProfile pair. Safe to call repeatedly; a second call only
// reports the existing business id.
pub async fn bootstrap(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    if state.config.is_production() {
        return Err(AppError::Forbidden(
            "bootstrap is disabled in production".to_string(),
        ));
    }

    let mut db = state.db.lock().unwrap();

    if let Some(existing) = queries::find_first_business(&db)? {
        return Ok(Json(serde_json::json!({
            "ok": true,
            "message": "Already bootstrapped",
            "businessId": existing.id,
        })));
    }

    let now = Utc::now().naive_utc();

    let business = Business {
        id: uuid::Uuid::new_v4().to_string(),
        name: "Demo Business".to_string(),
        timezone: "America/Chicago".to_string(),
        created_at: now,
    };
    queries::create_business(&db, &business)?;

    // Owner identity; real auth comes later.
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        business_id: business.id.clone(),
        email: "owner@example.com".to_string(),
        name: Some("Owner".to_string()),
        role: Role::Owner,
        created_at: now,
    };
    let staff = StaffProfile {
        id: uuid::Uuid::new_v4().to_string(),
        business_id: business.id.clone(),
        user_id: user.id.clone(),
        display_name: "Owner".to_string(),
        phone: None,
        is_active: true,
        sort_order: 0,
        created_at: now,
    };
    queries::create_user_with_staff(&mut db, &user, &staff)?;

    tracing::info!("bootstrapped business {}", business.id);

    Ok(Json(serde_json::json!({
        "ok": true,
        "business": business,
        "owner": UserWithStaff { user, staff },
    })))
}
