use askama::Template;
use crate::models::NavLink;

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub nav: Vec<NavLink>,
    pub backend_host: String,
    pub logged_in: bool,
    pub path: String,
}

crate::impl_base_template!(NotFoundTemplate);
