//! plainhttp - a tiny HTTP/1.1 server
//!
//! Serves `/`, `/echo/{s}`, `/user-agent` and `/files/{name}` with one
//! request per connection.

pub mod cli;
pub mod config;
pub mod files;
pub mod http;
pub mod router;
pub mod server;
