use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::db::queries;
use crate::errors::AppError;
use crate::state::AppState;

// GET /api/dev/businesses — development helper for eyeballing the tenant
// table; not part of the app surface.
pub async fn list_businesses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let db = state.db.lock().unwrap();
    let businesses = queries::list_businesses(&db)?;
    Ok(Json(serde_json::json!({ "ok": true, "businesses": businesses })))
}
