use askama::Template;
use crate::models::{CapacityRow, NavLink};

#[derive(Template)]
#[template(path = "capacity.html")]
pub struct CapacityTemplate {
    pub nav: Vec<NavLink>,
    pub backend_host: String,
    pub logged_in: bool,
    pub max_pct: f64,
    pub rows: Vec<CapacityRow>,
    pub error: Option<String>,
}

crate::impl_base_template!(CapacityTemplate);
