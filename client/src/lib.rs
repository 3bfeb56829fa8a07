//! # aura-client
//!
//! Leptos + WASM frontend for the Aura marketing dashboard.
//!
//! This crate contains the auth and dashboard pages, the session-gated
//! project context, the `ProjectBackend` abstraction with its HTTP and
//! in-memory implementations, and the wire types shared with the server.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: hydrate the server-rendered markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
