//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`session`, `projects`, `ui`) so components can
//! depend on small focused models; `dashboard` composes them for headless use.

pub mod dashboard;
pub mod projects;
pub mod session;
pub mod ui;
