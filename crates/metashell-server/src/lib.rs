//! HTTP server and command line front end for `metashell`.
//!
//! Every request path is rendered through the same HTML shell, with the
//! route's metadata written into it and a 200 or 404 status.

pub mod cli;
pub mod server;

pub use server::{router, serve, AppState};
