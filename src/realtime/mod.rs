//! Real-Time Events
//!
//! Live boop notifications over a WebSocket tied to the login session.
//!
//! ## Architecture
//!
//! - **Connection**: Opens the socket and runs reader/writer tasks
//! - **Messages**: Wire envelope for server and client events
//! - **Dispatcher**: Typed handler registration per event kind
//!
//! ## Events
//!
//! Server to client: `connected`, `boop_received`, `boop_sent`,
//! `badges_unlocked`, `global_stats_update`. Client to server: `send_boop`.
//! `Connect` and `Disconnect` are produced locally by the connection.

mod connection;
mod dispatcher;
mod messages;

pub use connection::{connect, socket_url, RealtimeError, RealtimeHandle, RealtimeResult};
pub use dispatcher::EventDispatcher;
pub use messages::{
    BadgesUnlocked, BoopReceived, BoopSender, BoopSent, ClientEvent, ConnectedAck, RealtimeEvent,
    ServerEvent,
};
