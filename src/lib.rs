//! vCenter report dashboard: a session shell and route table served as
//! HTML pages, plus the small report API the shell logs in through.

pub mod api;
pub mod capacity;
pub mod config;
pub mod dashboard;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod shell;
pub mod templates;
pub mod util;
pub mod vcenter;
