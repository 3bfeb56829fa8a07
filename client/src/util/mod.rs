//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Helpers here are environment-aware: they work the same in the browser
//! (`hydrate`) and on the server during SSR.

pub mod time;
