//! WebSocket connection handler
//!
//! One session per client connection: decode each request, run the tagger and
//! categorizer off the async workers, and answer on the same connection.
//! Requests on one connection are answered strictly in arrival order because
//! the session finishes one message before reading the next.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::protocol::WebSocketConfig;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{accept_async_with_config, WebSocketStream};

use crate::entities::{classify, BucketStore};
use crate::socket_server::protocol::{preview, ClientRequest, DecodeError, ServerMessage};
use crate::socket_server::session_registry::{SessionId, SessionRegistry};
use crate::tagger::{Tagger, TaggingError};

/// Everything a session needs, shared by all sessions of one listener
#[derive(Clone)]
pub struct SessionContext {
    pub tagger: Arc<dyn Tagger>,
    pub registry: Arc<SessionRegistry>,
    pub ws_config: WebSocketConfig,
}

impl SessionContext {
    pub fn new(tagger: Arc<dyn Tagger>) -> Self {
        Self {
            tagger,
            registry: Arc::new(SessionRegistry::new()),
            ws_config: WebSocketConfig::default(),
        }
    }

    /// Cap the size of a single inbound websocket message
    pub fn with_max_frame_bytes(mut self, max_bytes: usize) -> Self {
        self.ws_config.max_message_size = Some(max_bytes);
        self.ws_config.max_frame_size = Some(max_bytes);
        self
    }
}

/// Handle a single WebSocket connection until it closes or the server drains
///
/// `drain` flips to `true` when the listener stops accepting; the session then
/// finishes the message it is working on, closes, and returns.
pub async fn handle_connection<S>(
    stream: S,
    peer: Option<SocketAddr>,
    ctx: SessionContext,
    mut drain: watch::Receiver<bool>,
) where
    S: AsyncRead + AsyncWrite + Unpin,
{
    // Accept WebSocket handshake, giving up if the server starts draining first
    let ws_stream = tokio::select! {
        handshake = accept_async_with_config(stream, Some(ctx.ws_config)) => match handshake {
            Ok(ws) => ws,
            Err(e) => {
                tracing::warn!("WebSocket handshake failed for {:?}: {}", peer, e);
                return;
            }
        },
        Ok(_) = drain.wait_for(|draining| *draining) => {
            tracing::debug!("Dropping {:?} before handshake, server is draining", peer);
            return;
        }
    };

    let session_id = ctx.registry.register(peer);
    tracing::info!("[+] New session {} from {:?}", session_id, peer);

    let mut session = Session {
        ws: ws_stream,
        tagger: Arc::clone(&ctx.tagger),
        id: session_id.clone(),
        drain,
        handled: 0,
    };
    session.run().await;

    ctx.registry.unregister(&session_id);
    tracing::info!(
        "[-] Session {} from {:?} closed after {} message(s)",
        session_id,
        peer,
        session.handled
    );
}

/// State for a single connection
struct Session<S> {
    ws: WebSocketStream<S>,
    tagger: Arc<dyn Tagger>,
    id: SessionId,
    drain: watch::Receiver<bool>,
    handled: u64,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    async fn run(&mut self) {
        if *self.drain.borrow() {
            let _ = self.ws.close(None).await;
            return;
        }

        loop {
            tokio::select! {
                changed = self.drain.changed() => {
                    if changed.is_err() || *self.drain.borrow() {
                        tracing::debug!("Session {} closing for shutdown", self.id);
                        let _ = self.ws.close(None).await;
                        break;
                    }
                }

                msg = self.ws.next() => {
                    let result = match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_request(ClientRequest::decode(&text)).await
                        }
                        Some(Ok(Message::Binary(bytes))) => {
                            self.handle_request(ClientRequest::decode_bytes(&bytes)).await
                        }
                        // tungstenite queues the pong itself
                        Some(Ok(Message::Ping(_))) => Ok(()),
                        Some(Ok(Message::Close(_))) => {
                            tracing::debug!("Client {} requested close", self.id);
                            break;
                        }
                        Some(Ok(_)) => Ok(()),
                        Some(Err(e)) => Err(e),
                        None => break,
                    };

                    if let Err(e) = result {
                        log_connection_error(&self.id, &e);
                        break;
                    }
                }
            }
        }
    }

    async fn handle_request(
        &mut self,
        decoded: Result<ClientRequest, DecodeError>,
    ) -> Result<(), tungstenite::Error> {
        let request = match decoded {
            Ok(request) => request,
            Err(e) => return self.reject(e).await,
        };

        tracing::info!("[*] Session {} new task {}", self.id, preview(&request.message));
        self.handled += 1;

        let reply = match self.classify(request.message).await {
            Ok(entities) => ServerMessage::Entities {
                entities,
                id: request.id,
            },
            Err(e) => {
                tracing::warn!("Tagging failed in session {}: {}", self.id, e);
                ServerMessage::Error {
                    error: e.to_string(),
                    id: request.id,
                }
            }
        };
        self.send(&reply).await
    }

    /// Answer an undecodable frame when its id is known, otherwise drop it
    async fn reject(&mut self, err: DecodeError) -> Result<(), tungstenite::Error> {
        match err.recoverable_id() {
            Some(id) => {
                tracing::warn!("Rejecting malformed request in session {}: {}", self.id, err);
                let reply = ServerMessage::Error {
                    error: err.to_string(),
                    id: id.clone(),
                };
                self.send(&reply).await
            }
            None => {
                tracing::warn!("Dropping undecodable frame in session {}: {}", self.id, err);
                Ok(())
            }
        }
    }

    /// Run the tagger on the blocking pool so slow tagging never stalls other sessions
    async fn classify(&self, message: String) -> Result<BucketStore, TaggingError> {
        let tagger = Arc::clone(&self.tagger);
        tokio::task::spawn_blocking(move || classify(tagger.as_ref(), &message))
            .await
            .unwrap_or_else(|e| {
                Err(TaggingError::Panicked {
                    message: e.to_string(),
                })
            })
    }

    async fn send(&mut self, msg: &ServerMessage) -> Result<(), tungstenite::Error> {
        let json = match serde_json::to_string(msg) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to encode response in session {}: {}", self.id, e);
                return Ok(());
            }
        };
        self.ws.send(Message::Text(json)).await
    }
}

fn log_connection_error(session_id: &str, err: &tungstenite::Error) {
    match err {
        tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => {
            tracing::debug!("Session {} connection already closed", session_id);
        }
        _ => tracing::warn!("WebSocket error in session {}: {}", session_id, err),
    }
}
