//! Core data types
//!
//! Shapes returned by the boop server's REST API and real-time events.

use serde::{Deserialize, Serialize};

use super::paw::PawStyle;
use super::timestamp::{self, Timestamp};

/// Server-assigned user identifier
pub type UserId = i64;

/// A booper as listed by the API.
///
/// The full user list carries every field; favorites and mutuals lists
/// return subsets, so everything but `id` and `display_name` is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: Option<String>,
    pub display_name: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub color_theme: Option<String>,
    #[serde(default)]
    pub paw_style: PawStyle,
    #[serde(default, with = "timestamp::optional")]
    pub last_active: Option<Timestamp>,
}

/// A received boop row from the "new boops since login" listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBoop {
    #[serde(default)]
    pub id: Option<i64>,
    pub sender_id: UserId,
    #[serde(default)]
    pub recipient_id: Option<UserId>,
    /// Paw recorded on the boop when it was sent
    #[serde(default)]
    pub paw_style: Option<PawStyle>,
    #[serde(with = "timestamp::required")]
    pub created_at: Timestamp,
    pub sender_name: String,
    #[serde(default)]
    pub sender_color: Option<String>,
    /// Sender's current paw preference
    #[serde(default)]
    pub sender_paw: Option<PawStyle>,
}

/// A single incoming boop as seen by the notification aggregator
#[derive(Debug, Clone, PartialEq)]
pub struct BoopEvent {
    pub sender_id: UserId,
    pub sender_name: String,
    pub paw_style: Option<PawStyle>,
    pub created_at: Timestamp,
}

impl From<NewBoop> for BoopEvent {
    fn from(boop: NewBoop) -> Self {
        Self {
            sender_id: boop.sender_id,
            sender_name: boop.sender_name,
            // The sender's current paw wins over the one stored on the boop
            paw_style: boop.sender_paw.or(boop.paw_style),
            created_at: boop.created_at,
        }
    }
}

/// Site-wide counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    #[serde(default)]
    pub total_boops: u64,
    #[serde(default)]
    pub total_users: u64,
    #[serde(default, with = "timestamp::optional")]
    pub last_updated: Option<Timestamp>,
}

/// Personal boop counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub boops_sent: u64,
    pub boops_received: u64,
}

/// An achievement badge.
///
/// Newly awarded badges (real-time events, boop responses) carry only the
/// descriptive fields; the badge listing adds threshold and earn time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub unlocks_paw: Option<PawStyle>,
    #[serde(default)]
    pub threshold: Option<u64>,
    #[serde(default, with = "timestamp::optional")]
    pub earned_at: Option<Timestamp>,
}

/// Unlock status of one paw style for the current user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PawInfo {
    pub name: PawStyle,
    pub emoji: String,
    pub unlocked: bool,
    #[serde(default)]
    pub unlock_hint: Option<String>,
}

/// A boop from the received-boops history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivedBoop {
    pub id: i64,
    pub sender_id: UserId,
    #[serde(default)]
    pub paw_style: Option<PawStyle>,
    #[serde(with = "timestamp::required")]
    pub created_at: Timestamp,
    pub sender_name: String,
    #[serde(default)]
    pub sender_color: Option<String>,
}
