//! littlehttpd - a small HTTP/1.x file server.
//!
//! Core library: request parsing, dispatch, file resolution, and the
//! per-connection service. The binary adds daemonization and signal
//! handling on top.

pub mod config;
pub mod daemon;
pub mod http;
pub mod logging;
pub mod resolver;
pub mod server;
