//! Server-hosted console shell: routes, session cookies, and page rendering.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
pub mod render;
