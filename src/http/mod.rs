//! HTTP/1.1 subset: one request in, one response out, then close.
//!
//! - **`parser`**: turns the buffered bytes into a [`request::Request`]
//! - **`request`** / **`response`**: the data model
//! - **`writer`**: serializes a response and pushes it to the peer
//! - **`connection`**: per-connection state machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← read until the request parses or the size bound is hit
//!        └──────┬──────┘
//!               │ Request received          (malformed → 400, oversize → 413)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← route table picks a handler
//!        └──────┬───────────┘
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← send response
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use plainhttp::http::connection::Connection;
//! use plainhttp::router::Router;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!     let router = Arc::new(Router::minimal());
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = router.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, router, 1024);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
