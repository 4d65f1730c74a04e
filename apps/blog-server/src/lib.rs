//! # Quill Blog Server
//!
//! Handlers, middleware, and state wiring for the HTTP server. The binary
//! in `main.rs` assembles these; the endpoint tests drive them directly.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod state;
