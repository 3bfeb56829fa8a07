//! Reusable UI components shared across dashboard pages.
//!
//! DESIGN
//! ======
//! Components read the dashboard context instead of taking callbacks for
//! every mutation; pages only compose them.

pub mod create_project_dialog;
pub mod dashboard_provider;
pub mod integration_row;
pub mod project_card;
pub mod project_switcher;
pub mod toast;
