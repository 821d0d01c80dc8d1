// Server module entry point
// Listener creation, accept loop and per-connection serving

pub mod connection;
pub mod listener;

pub use listener::create_reusable_listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

/// How often idle sessions are swept from the store
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Accept connections until Ctrl-C is received.
///
/// Must run inside a `LocalSet`: connections are served with `spawn_local`.
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut session_sweep = tokio::time::interval(SESSION_SWEEP_INTERVAL);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = session_sweep.tick() => {
                let removed = state.sessions.purge_expired();
                if removed > 0 {
                    logger::log_debug(&format!(
                        "Purged {removed} expired sessions, {} live",
                        state.sessions.len()
                    ));
                }
            }

            result = &mut shutdown => {
                if let Err(e) = result {
                    logger::log_error(&format!("Failed to listen for shutdown signal: {e}"));
                }
                logger::log_server_stop();
                return Ok(());
            }
        }
    }
}
