pub mod business;
pub mod service;
pub mod staff;
pub mod user;

pub use business::Business;
pub use service::{Service, ServicePatch, ServiceWithStaff, StaffLink};
pub use staff::{StaffPatch, StaffProfile};
pub use user::{Role, User, UserWithStaff};

/// Deserializer for patch fields that must keep "key absent" and "key set to
/// null" apart: absent stays `None` (via `#[serde(default)]`), an explicit
/// null becomes `Some(None)`, a value becomes `Some(Some(v))`.
pub(crate) fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    serde::Deserialize::deserialize(de).map(Some)
}
