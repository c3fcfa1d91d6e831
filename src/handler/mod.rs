// Request handling module entry
// Router, product handlers, body validation, and request guards

mod draft;
mod guard;
mod products;
mod router;

pub use router::handle_request;

use thiserror::Error;

/// Faults that escape a route handler
///
/// The dispatch boundary converts these into a generic 500 response and
/// logs the detail server-side. Domain failures (400/401/404) are
/// detected inline and returned as responses, never as errors.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("failed to read request body: {0}")]
    Body(String),
    #[error("malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),
}
