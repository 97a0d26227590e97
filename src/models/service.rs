use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::StaffProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub description: Option<String>,
    pub duration_min: i64,
    pub price_cents: i64,
    pub deposit_cents: i64,
    pub buffer_before_min: i64,
    pub buffer_after_min: i64,
    pub is_active: bool,
    pub is_public: bool,
    pub created_at: NaiveDateTime,
}

/// One row of the service/staff junction, hydrated with the staff profile it
/// points at.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffLink {
    pub business_id: String,
    pub service_id: String,
    pub staff_id: String,
    pub staff: StaffProfile,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceWithStaff {
    #[serde(flatten)]
    pub service: Service,
    pub staff_links: Vec<StaffLink>,
}

/// Sparse patch for a service. `staff_ids` is the replace-all assignment
/// list: present (even empty) means "make this the exact set of eligible
/// staff", absent means "leave the links alone".
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
    pub duration_min: Option<i64>,
    pub price_cents: Option<i64>,
    pub deposit_cents: Option<i64>,
    pub buffer_before_min: Option<i64>,
    pub buffer_after_min: Option<i64>,
    pub is_active: Option<bool>,
    pub is_public: Option<bool>,
    pub staff_ids: Option<Vec<String>>,
}
