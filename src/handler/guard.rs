// Request guards module
// Ordered interceptors composed around the route handlers

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::AUTHORIZATION;
use hyper::{Request, Response};

use crate::http;

/// Shared-secret literal for the demonstration bearer gate
///
/// Not a real credential: no issuance, expiry, or identity is attached
/// to it.
const BEARER_TOKEN: &str = "Bearer secret-token";

/// A guard either passes the request through (`None`) or short-circuits
/// with a response (`Some`) before the handler runs
pub type Guard<B> = fn(&Request<B>) -> Option<Response<Full<Bytes>>>;

/// Guard chain for mutating routes, applied in order
pub fn mutating<B>() -> [Guard<B>; 1] {
    [require_bearer]
}

/// Run guards in order, stopping at the first short-circuit
pub fn run<B>(req: &Request<B>, guards: &[Guard<B>]) -> Option<Response<Full<Bytes>>> {
    guards.iter().find_map(|g| g(req))
}

/// Reject the request unless the Authorization header matches the
/// shared-secret literal exactly
fn require_bearer<B>(req: &Request<B>) -> Option<Response<Full<Bytes>>> {
    match req.headers().get(AUTHORIZATION) {
        Some(value) if value.as_bytes() == BEARER_TOKEN.as_bytes() => None,
        _ => Some(http::unauthorized()),
    }
}
