//! # Booping
//!
//! Terminal client for a boop server: see who's around, star your
//! favorites, boop people and get booped back in real time.
//!
//! ## Features
//!
//! - **User directory**: favorites, boop buddies and everyone else
//! - **Live boops**: WebSocket events with typed handlers
//! - **Catch-up**: boops received while away, grouped by sender
//! - **Stats and badges**: personal and site-wide counters
//!
//! ## Modules
//!
//! - [`model`]: Wire data types
//! - [`api`]: REST client for the boop server
//! - [`realtime`]: WebSocket connection and event dispatch
//! - [`notifications`]: Per-sender aggregation of new boops
//! - [`directory`]: Favorite set and user sections
//! - [`app`]: Client state, operations and terminal view
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use booping::api::{BoopApi, BoopClient};
//! use booping::notifications::NewBoopsSummary;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = BoopClient::new("http://localhost:5000", Duration::from_secs(30))?;
//!     client.login("frog", "ribbit").await?;
//!
//!     if let Some(summary) = NewBoopsSummary::from_batch(client.new_boops().await?) {
//!         for sender in &summary.senders {
//!             println!("{}{}", sender.sender_name, sender.count_suffix());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod directory;
pub mod logging;
pub mod model;
pub mod notifications;
pub mod realtime;

// Re-export top-level types for convenience
pub use model::{
    Badge, BoopEvent, GlobalStats, NewBoop, PawInfo, PawStyle, ReceivedBoop, Timestamp, User,
    UserId, UserStats,
};

pub use api::{ApiError, ApiResult, BoopApi, BoopClient, BoopReceipt, ProfileUpdate};

pub use realtime::{
    ClientEvent, EventDispatcher, RealtimeError, RealtimeEvent, RealtimeHandle, RealtimeResult,
    ServerEvent,
};

pub use notifications::{aggregate_by_sender, NewBoopsSummary, SenderAggregate};

pub use directory::{Activity, FavoriteSet, UserCard, UserSections};

pub use app::{App, Command, TerminalView, View};

pub use config::{Config, ConfigError, LoggingConfig, ServerConfig};
