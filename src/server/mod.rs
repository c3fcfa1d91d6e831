// Server module entry
// Listener creation, accept loop, and per-connection HTTP serving

pub mod connection;
pub mod listener;

// Re-export common entry points
pub use listener::create_listener;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

/// Accept connections and serve them until the process exits
pub async fn run(
    listener: TcpListener,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                if state.cached_access_log.load(Ordering::Relaxed) {
                    logger::log_connection_accepted(&peer_addr);
                }
                connection::serve(stream, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
