use std::env;
use std::path::Path;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_PORT: u16 = 8000;
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_VCENTER_SCHEME: &str = "https";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

/// Base URL of the report API the session shell talks to.
pub fn get_backend_url() -> String {
    sanitize_base_url(&env::var("BACKEND_URL").unwrap_or_default())
}

/// vCenter server used by the report API until a login names another one.
pub fn get_vcenter_server() -> Option<String> {
    env::var("VCENTER_SERVER")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn get_vcenter_scheme() -> String {
    match env::var("VCENTER_SCHEME") {
        Ok(raw) if raw.trim().eq_ignore_ascii_case("http") => "http".to_string(),
        _ => DEFAULT_VCENTER_SCHEME.to_string(),
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_BACKEND_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
