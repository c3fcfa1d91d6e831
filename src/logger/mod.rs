//! Logger module
//!
//! Timestamped logging for the product API. Request lines and lifecycle
//! messages go to stdout, errors to stderr.

use chrono::{SecondsFormat, Utc};
use std::net::SocketAddr;

use crate::config::Config;

/// Log an incoming request before it is dispatched
pub fn log_request(method: &str, path: &str) {
    println!(
        "{} - {method} {path}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    );
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Product API started successfully");
    println!("Listening on: http://{addr}");
    println!("Log level: {}", config.logging.level);
    println!("Using Tokio runtime for concurrency");
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}
