//! Networking modules for the project backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `backend` puts them (or an in-memory mock)
//! behind one interface, and `types` defines the shared wire schema.

pub mod api;
pub mod backend;
pub mod demo;
pub mod error;
pub mod retry;
pub mod types;
