pub mod app_state;
pub mod dashboard_session;
pub mod nav_link;
pub mod capacity_row;

pub use app_state::AppState;
pub use dashboard_session::DashboardSession;
pub use nav_link::NavLink;
pub use capacity_row::CapacityRow;
