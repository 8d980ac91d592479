pub mod activity;
pub mod analytics;
pub mod follow_up;
pub mod import;
pub mod lead;
pub mod reference;
pub mod task;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` like a missing field. Pair with `#[serde(default)]`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
