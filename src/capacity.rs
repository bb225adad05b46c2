//! Remaining capacity under a fixed utilization ceiling.

use std::collections::BTreeMap;

use thiserror::Error;

/// Highest utilization percentage a resource may be planned up to.
pub const MAX_UTILIZATION_PCT: f64 = 85.0;

#[derive(Debug, Error, PartialEq)]
pub enum CapacityError {
    #[error("Invalid utilization entry '{0}': expected resource=percent")]
    InvalidEntry(String),
}

/// Headroom left per resource, in percentage points, never below zero.
pub fn remaining_capacity(utilization: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    utilization
        .iter()
        .map(|(key, used_pct)| (key.clone(), (MAX_UTILIZATION_PCT - used_pct).max(0.0)))
        .collect()
}

/// Parse `resource=percent` pairs such as `cpu=40`.
pub fn parse_utilization<I, S>(entries: I) -> Result<BTreeMap<String, f64>, CapacityError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = BTreeMap::new();
    for raw in entries {
        let raw = raw.as_ref();
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| CapacityError::InvalidEntry(raw.to_string()))?;
        let key = key.trim();
        let pct = value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| CapacityError::InvalidEntry(raw.to_string()))?;
        if key.is_empty() {
            return Err(CapacityError::InvalidEntry(raw.to_string()));
        }
        map.insert(key.to_string(), pct);
    }
    Ok(map)
}
