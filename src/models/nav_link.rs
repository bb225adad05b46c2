use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct NavLink {
    pub path: String,
    pub title: String,
    pub active: bool,
}
