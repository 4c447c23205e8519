//! WebSocket Connection
//!
//! Opens the session socket and splits it into a reader task that decodes
//! server frames and a writer task that drains outgoing client events.
//! Both talk to the rest of the program over unbounded channels.

use futures_util::{SinkExt, Stream, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, COOKIE};
use tokio_tungstenite::tungstenite::{Error as WsError, Message};
use tokio_tungstenite::connect_async;
use url::Url;

use super::messages::{ClientEvent, RealtimeEvent, ServerEvent};
use crate::model::UserId;

/// Errors from the real-time connection
#[derive(Error, Debug)]
pub enum RealtimeError {
    #[error("Invalid socket URL: {0}")]
    Url(String),

    #[error("Invalid cookie header: {0}")]
    Header(String),

    #[error("WebSocket error: {0}")]
    Transport(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("Not connected")]
    Closed,
}

pub type RealtimeResult<T> = Result<T, RealtimeError>;

/// Build the socket URL from the server's HTTP base URL.
///
/// `http` becomes `ws` and `https` becomes `wss`; `socket_path` replaces the
/// base path.
pub fn socket_url(base: &Url, socket_path: &str) -> RealtimeResult<Url> {
    let scheme = match base.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => return Err(RealtimeError::Url(format!("unsupported scheme '{}'", other))),
    };

    let mut url = base.clone();
    url.set_scheme(scheme)
        .map_err(|_| RealtimeError::Url(format!("cannot use scheme '{}'", scheme)))?;
    url.set_path(&format!("/{}", socket_path.trim_start_matches('/')));
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Sending half of an open connection
#[derive(Debug, Clone)]
pub struct RealtimeHandle {
    outbox: mpsc::UnboundedSender<ClientEvent>,
}

impl RealtimeHandle {
    pub fn send(&self, event: ClientEvent) -> RealtimeResult<()> {
        self.outbox.send(event).map_err(|_| RealtimeError::Closed)
    }

    pub fn send_boop(&self, recipient_id: UserId) -> RealtimeResult<()> {
        self.send(ClientEvent::send_boop(recipient_id))
    }

    /// False once the writer has stopped
    pub fn is_connected(&self) -> bool {
        !self.outbox.is_closed()
    }
}

/// Open the socket, forwarding `cookie` on the handshake so the server can
/// tie the connection to our login session.
///
/// The receiver yields `Connect` first and `Disconnect` last. There is no
/// automatic reconnect.
pub async fn connect(
    url: &Url,
    cookie: Option<&str>,
) -> RealtimeResult<(RealtimeHandle, mpsc::UnboundedReceiver<RealtimeEvent>)> {
    let mut request = url.as_str().into_client_request()?;
    if let Some(cookie) = cookie {
        let value =
            HeaderValue::from_str(cookie).map_err(|e| RealtimeError::Header(e.to_string()))?;
        request.headers_mut().insert(COOKIE, value);
    }

    let (ws, _response) = connect_async(request).await?;
    tracing::info!(url = %url, "Real-time connection established");

    let (mut sink, stream) = ws.split();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let (outbox, mut outgoing) = mpsc::unbounded_channel::<ClientEvent>();
    let (write_failed, write_failures) = mpsc::unbounded_channel::<String>();

    let _ = event_tx.send(RealtimeEvent::Connect);

    let writer = tokio::spawn(async move {
        while let Some(event) = outgoing.recv().await {
            let text = match event.encode() {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to encode client event");
                    continue;
                }
            };
            if let Err(e) = sink.send(Message::Text(text)).await {
                tracing::warn!(error = %e, "Socket write failed");
                let _ = write_failed.send(format!("write failed: {}", e));
                return;
            }
        }
        let _ = sink.close().await;
    });

    tokio::spawn(async move {
        let reason = read_events(stream, write_failures, &event_tx).await;
        writer.abort();
        tracing::info!(reason = ?reason, "Real-time connection closed");
        let _ = event_tx.send(RealtimeEvent::Disconnect { reason });
    });

    Ok((RealtimeHandle { outbox }, event_rx))
}

/// Forward server frames until the socket closes or the writer reports a
/// failed send. Returns the close reason, if any.
async fn read_events<S>(
    mut stream: S,
    mut write_failures: mpsc::UnboundedReceiver<String>,
    events: &mpsc::UnboundedSender<RealtimeEvent>,
) -> Option<String>
where
    S: Stream<Item = Result<Message, WsError>> + Unpin,
{
    let mut writer_running = true;
    loop {
        let frame = tokio::select! {
            frame = stream.next() => frame,
            failure = write_failures.recv(), if writer_running => match failure {
                Some(reason) => return Some(reason),
                None => {
                    writer_running = false;
                    continue;
                }
            },
        };

        match frame {
            Some(Ok(Message::Text(text))) => match ServerEvent::decode(&text) {
                Ok(Some(event)) => {
                    tracing::debug!(event = event.name(), "Server event");
                    if events.send(RealtimeEvent::Server(event)).is_err() {
                        return None;
                    }
                }
                Ok(None) => tracing::debug!(frame = %text, "Ignoring unknown event"),
                Err(e) => tracing::warn!(error = %e, "Malformed server frame"),
            },
            Some(Ok(Message::Close(frame))) => {
                return frame.map(|f| f.reason.to_string()).filter(|r| !r.is_empty());
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => return Some(e.to_string()),
            None => return None,
        }
    }
}
