use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct CapacityRow {
    pub resource: String,
    pub used_pct: f64,
    pub remaining_pct: f64,
}
