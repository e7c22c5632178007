pub mod fallback;
pub mod profile;
pub mod rental;
pub mod renter;
pub mod report;
pub mod review;

use serde::{Deserialize, Deserializer};

/// Numeric columns come back from PostgREST as JSON numbers, but `numeric`
/// columns may be serialized as strings depending on the schema. Accept
/// both, and treat anything else as absent.
pub(crate) fn de_lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
