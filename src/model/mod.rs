//! Data Model
//!
//! Typed shapes for everything the boop server sends: users, boops,
//! badges, counters, and the paw-style catalog.

mod paw;
pub mod timestamp;
mod types;

pub use paw::{PawStyle, UnknownPawStyle};
pub use timestamp::{parse_timestamp, Timestamp};
pub use types::{
    Badge, BoopEvent, GlobalStats, NewBoop, PawInfo, ReceivedBoop, User, UserId, UserStats,
};
