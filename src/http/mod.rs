//! HTTP protocol implementation.
//!
//! This module implements an HTTP/1.x server that handles exactly one
//! request per connection; every response carries `Connection: close` and
//! keep-alive is never offered.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: Orchestrates one connection: parse, dispatch, write
//! - **`parser`**: Reads a request line, header block and body from a stream
//! - **`request`**: Parsed request representation and header lookup
//! - **`response`**: Response representation and the four canned outcomes
//! - **`handler`**: Maps a request and the document root to a response
//! - **`writer`**: Serializes responses and streams file bodies
//! - **`mime`**: Content type classification for served files
//!
//! # Request lifecycle
//!
//! ```text
//!        ┌─────────────┐
//!        │   Parsing   │ ← Read request line, headers, optional body
//!        └──────┬──────┘
//!               │ Request parsed     (parse failure → drop connection,
//!               ▼                     nothing is sent)
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Resolve path, pick 200/404/405/501
//!        └──────┬───────────┘
//!               │ Response chosen
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Common headers, then stream the body
//!        └──────┬───────────┘
//!               │ Response sent
//!               └─ Close (always)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use littlehttpd::config::ServerConfig;
//! use littlehttpd::http::connection;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! async fn run(config: Arc<ServerConfig>) -> anyhow::Result<()> {
//!     let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let config = Arc::clone(&config);
//!         tokio::spawn(async move {
//!             if let Err(e) = connection::serve(socket, &config).await {
//!                 eprintln!("connection error: {e:#}");
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod handler;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
