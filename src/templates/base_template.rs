use crate::models::NavLink;

/// Fields every dashboard page needs for `base.html`.
pub trait BaseTemplate {
    fn nav(&self) -> &[NavLink];
    fn backend_host(&self) -> &str;
    fn logged_in(&self) -> bool;
}

/// Implement [`BaseTemplate`] for a template struct carrying the shared fields.
#[macro_export]
macro_rules! impl_base_template {
    ($struct_name:ty) => {
        impl $crate::templates::BaseTemplate for $struct_name {
            fn nav(&self) -> &[$crate::models::NavLink] {
                &self.nav
            }
            fn backend_host(&self) -> &str {
                &self.backend_host
            }
            fn logged_in(&self) -> bool {
                self.logged_in
            }
        }
    };
}
