use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    pub id: String,
    pub business_id: String,
    pub user_id: String,
    pub display_name: String,
    pub phone: Option<String>,
    pub is_active: bool,
    pub sort_order: i64,
    pub created_at: NaiveDateTime,
}

/// Sparse patch for a staff profile. Fields left `None` are not touched;
/// `phone` goes through [`super::double_option`] so an explicit null clears
/// it while an omitted key leaves it alone.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPatch {
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub phone: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i64>,
}
