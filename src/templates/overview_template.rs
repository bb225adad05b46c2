use askama::Template;
use crate::models::NavLink;

#[derive(Template)]
#[template(path = "overview.html")]
pub struct OverviewTemplate {
    pub nav: Vec<NavLink>,
    pub backend_host: String,
    pub logged_in: bool,
    pub server: String,
    pub username: String,
    /// Pretty-printed payload, absent until an overview has loaded.
    pub overview: Option<String>,
    pub message: Option<String>,
}

crate::impl_base_template!(OverviewTemplate);
