//! Collection normalization
//!
//! Sequence fields that arrive as `null` or are missing altogether become
//! empty sequences. Scalars and nested records are left alone, zero valued or
//! not. Decoding a document applies this rule through [`null_as_empty`], so no
//! public entry point can hand out a null collection.

use serde::{Deserialize, Deserializer};

/// Serde helper: decode `null` as an empty `Vec`.
///
/// Pair with `#[serde(default)]` so an absent field is covered too.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
