pub mod customization;
pub mod portfolio;
pub mod project;
pub mod template;
pub mod user;
pub mod version;

use serde::{Deserialize, Deserializer};

/// Distinguishes an explicit `null` (clear the field) from an omitted key (keep it)
/// in PATCH bodies. Use with `#[serde(default, deserialize_with = "double_option")]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
