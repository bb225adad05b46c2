pub mod base_template;
pub mod login_template;
pub mod overview_template;
pub mod section_template;
pub mod capacity_template;
pub mod not_found_template;

pub use base_template::BaseTemplate;
pub use login_template::LoginTemplate;
pub use overview_template::OverviewTemplate;
pub use section_template::SectionTemplate;
pub use capacity_template::CapacityTemplate;
pub use not_found_template::NotFoundTemplate;
