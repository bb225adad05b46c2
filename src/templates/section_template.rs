use askama::Template;
use crate::models::NavLink;

#[derive(Template)]
#[template(path = "section.html")]
pub struct SectionTemplate {
    pub nav: Vec<NavLink>,
    pub backend_host: String,
    pub logged_in: bool,
    pub title: String,
}

crate::impl_base_template!(SectionTemplate);
