//! dirlist: a small HTTP server rendering directory listings
//!
//! The [`listing`] module holds the renderer and the traits it uses to reach
//! its collaborators; the remaining modules form the host server around it.

pub mod config;
pub mod files;
pub mod handler;
pub mod http;
pub mod listing;
pub mod logger;
pub mod server;
pub mod session;
