use askama::Template;
use crate::models::NavLink;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub nav: Vec<NavLink>,
    pub backend_host: String,
    pub logged_in: bool,
    pub server: String,
    pub username: String,
    pub message: Option<String>,
}

crate::impl_base_template!(LoginTemplate);
