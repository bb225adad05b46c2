pub mod auth;
pub mod helpers;
pub mod pages;
