//! Local web server: capture page plus JSON API.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
