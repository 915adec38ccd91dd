//! Connection listener
//!
//! Binds the listening socket, accepts clients, and spawns one session task
//! per connection. Lifecycle:
//!
//! ```text
//! Starting ──bind──► Listening ──shutdown signal──► Draining ──sessions done──► Stopped
//! ```
//!
//! While draining no new connections are accepted; open sessions finish the
//! message they are working on and close. Sessions still open when the drain
//! timeout expires are aborted.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::config::ServerConfig;
use crate::error::{EntityStreamError, Result};
use crate::socket_server::connection::{handle_connection, SessionContext};
use crate::socket_server::session_registry::SessionRegistry;
use crate::tagger::Tagger;

/// Pause after a failed accept before trying again
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Where the listener is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Starting,
    Listening,
    Draining,
    Stopped,
}

/// Accept loop plus the sessions it spawned
pub struct Listener {
    listener: TcpListener,
    local_addr: SocketAddr,
    drain_timeout: Option<Duration>,
    ctx: SessionContext,
    state: watch::Sender<ListenerState>,
}

impl Listener {
    /// Bind the configured endpoint. Failure here is fatal for the process.
    pub async fn bind(config: &ServerConfig, tagger: Arc<dyn Tagger>) -> Result<Self> {
        config.validate()?;
        let (state, _) = watch::channel(ListenerState::Starting);

        let addr = config.bind_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| EntityStreamError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener.local_addr()?;

        tracing::info!(
            "[0] Server @ {} (tagger: {})",
            local_addr.port(),
            tagger.name()
        );

        let ctx = SessionContext::new(tagger).with_max_frame_bytes(config.max_frame_bytes);
        Ok(Self {
            listener,
            local_addr,
            drain_timeout: config.drain_timeout(),
            ctx,
            state,
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn state(&self) -> ListenerState {
        *self.state.borrow()
    }

    /// Watch lifecycle transitions
    pub fn subscribe_state(&self) -> watch::Receiver<ListenerState> {
        self.state.subscribe()
    }

    /// Registry of open sessions
    pub fn registry(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.ctx.registry)
    }

    /// Accept connections until `shutdown` resolves, then drain and stop
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        let Self {
            listener,
            local_addr,
            drain_timeout,
            ctx,
            state,
        } = self;

        let (drain_tx, drain_rx) = watch::channel(false);
        let mut sessions = JoinSet::new();
        state.send_replace(ListenerState::Listening);
        tracing::info!("Listening on ws://{}", local_addr);

        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,

                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        tracing::debug!("Accepted connection from {}", peer);
                        let ctx = ctx.clone();
                        let drain_rx = drain_rx.clone();
                        sessions.spawn(async move {
                            handle_connection(stream, Some(peer), ctx, drain_rx).await;
                        });
                    }
                    Err(e) => {
                        tracing::error!("Failed to accept connection: {}", e);
                        // Out of descriptors and the like; let sessions release some
                        tokio::time::sleep(ACCEPT_BACKOFF).await;
                    }
                },

                Some(finished) = sessions.join_next(), if !sessions.is_empty() => {
                    if let Err(e) = finished {
                        tracing::error!("Session task failed: {}", e);
                    }
                }
            }
        }

        // Stop accepting before telling sessions to wind down
        drop(listener);
        state.send_replace(ListenerState::Draining);
        tracing::info!(
            "Shutting down, draining {} open session(s)",
            ctx.registry.len()
        );
        let _ = drain_tx.send(true);

        let deadline = drain_timeout.map(|limit| tokio::time::Instant::now() + limit);
        loop {
            let next = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, sessions.join_next()).await {
                        Ok(next) => next,
                        Err(_) => {
                            let stuck: Vec<String> = ctx
                                .registry
                                .snapshot()
                                .into_iter()
                                .map(|s| s.id)
                                .collect();
                            tracing::warn!(
                                "Drain timeout after {:?}, aborting {} session(s): {}",
                                drain_timeout.unwrap_or_default(),
                                sessions.len(),
                                stuck.join(", ")
                            );
                            sessions.shutdown().await;
                            break;
                        }
                    }
                }
                None => sessions.join_next().await,
            };
            match next {
                Some(Err(e)) => tracing::error!("Session task failed: {}", e),
                Some(Ok(())) => {}
                None => break,
            }
        }

        state.send_replace(ListenerState::Stopped);
        tracing::info!("Server stopped ({} session(s) served)", ctx.registry.total_opened());
        Ok(())
    }
}

/// Resolves on Ctrl-C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }
}
