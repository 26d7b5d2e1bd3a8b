//! Wire-format request and response types.
//!
//! Response types (`…Dto`) mirror the server JSON exactly and are mapped into
//! `core::domain` entities by the repositories. Request types are serialized
//! as-is.

pub mod attendance;
pub mod auth;
pub mod finance;
pub mod reports;
pub mod students;

pub use attendance::*;
pub use auth::*;
pub use finance::*;
pub use reports::*;
pub use students::*;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Custom deserializer: accepts a JSON number or a numeric string, and falls
/// back to `0.0` for anything else (including `null`).
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Like [`lenient_f64`], but `null`, a missing field or an unparsable string
/// stay `None`
pub(crate) fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

/// Same as [`lenient_f64`] for counters
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()).unwrap_or(0),
        Value::String(s) => s.trim().parse::<u32>().unwrap_or(0),
        _ => 0,
    })
}

fn default_true() -> bool {
    true
}
