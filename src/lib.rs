//! Hearth - static HTTP/1.x origin server
//!
//! Core library for request parsing, dispatch and response framing.

pub mod config;
pub mod http;
pub mod server;
pub mod static_files;
