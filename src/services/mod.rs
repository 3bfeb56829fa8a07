//! Domain services behind the HTTP routes.

pub mod projects;
pub mod session;
