use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::StaffProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub business_id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Owner,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Staff => "STAFF",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "OWNER" => Role::Owner,
            _ => Role::Staff,
        }
    }
}

/// A User joined with its StaffProfile, as returned by staff creation and
/// bootstrap.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserWithStaff {
    #[serde(flatten)]
    pub user: User,
    pub staff: StaffProfile,
}
