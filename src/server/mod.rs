//! TCP front end: binds the socket and hands each accepted stream to a
//! [`crate::http::connection::Connection`].

pub mod listener;
