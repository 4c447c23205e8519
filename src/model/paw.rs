//! Paw styles
//!
//! Cosmetic tag choosing which emoji represents a user's boop.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known paw styles. Names the client does not recognize fall back to `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PawStyle {
    #[default]
    Default,
    Cat,
    Sparkle,
    Heart,
    Moon,
    Ghost,
    Fire,
    Rainbow,
    Star,
    Galaxy,
    Skeleton,
    Alien,
    Robot,
    Sun,
    Lightning,
    Snowflake,
    Frog,
}

impl PawStyle {
    pub const ALL: [PawStyle; 17] = [
        PawStyle::Default,
        PawStyle::Cat,
        PawStyle::Sparkle,
        PawStyle::Heart,
        PawStyle::Moon,
        PawStyle::Ghost,
        PawStyle::Fire,
        PawStyle::Rainbow,
        PawStyle::Star,
        PawStyle::Galaxy,
        PawStyle::Skeleton,
        PawStyle::Alien,
        PawStyle::Robot,
        PawStyle::Sun,
        PawStyle::Lightning,
        PawStyle::Snowflake,
        PawStyle::Frog,
    ];

    /// Paws every account starts with
    pub const STARTER: [PawStyle; 5] = [
        PawStyle::Default,
        PawStyle::Cat,
        PawStyle::Sparkle,
        PawStyle::Heart,
        PawStyle::Moon,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PawStyle::Default => "default",
            PawStyle::Cat => "cat",
            PawStyle::Sparkle => "sparkle",
            PawStyle::Heart => "heart",
            PawStyle::Moon => "moon",
            PawStyle::Ghost => "ghost",
            PawStyle::Fire => "fire",
            PawStyle::Rainbow => "rainbow",
            PawStyle::Star => "star",
            PawStyle::Galaxy => "galaxy",
            PawStyle::Skeleton => "skeleton",
            PawStyle::Alien => "alien",
            PawStyle::Robot => "robot",
            PawStyle::Sun => "sun",
            PawStyle::Lightning => "lightning",
            PawStyle::Snowflake => "snowflake",
            PawStyle::Frog => "frog",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            PawStyle::Default => "🐾",
            PawStyle::Cat => "🐱",
            PawStyle::Sparkle => "✨",
            PawStyle::Heart => "💖",
            PawStyle::Moon => "🌙",
            PawStyle::Ghost => "👻",
            PawStyle::Fire => "🔥",
            PawStyle::Rainbow => "🌈",
            PawStyle::Star => "⭐",
            PawStyle::Galaxy => "🌌",
            PawStyle::Skeleton => "💀",
            PawStyle::Alien => "👽",
            PawStyle::Robot => "🤖",
            PawStyle::Sun => "☀️",
            PawStyle::Lightning => "⚡",
            PawStyle::Snowflake => "❄️",
            PawStyle::Frog => "🐸",
        }
    }

    /// Lenient lookup used for server data
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for PawStyle {
    type Err = UnknownPawStyle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PawStyle::ALL
            .iter()
            .copied()
            .find(|paw| paw.name() == wanted)
            .ok_or_else(|| UnknownPawStyle(s.to_string()))
    }
}

impl From<String> for PawStyle {
    fn from(name: String) -> Self {
        PawStyle::from_name(&name)
    }
}

impl From<PawStyle> for String {
    fn from(paw: PawStyle) -> Self {
        paw.name().to_string()
    }
}

impl fmt::Display for PawStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Returned by strict parsing (CLI input)
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown paw style: {0}")]
pub struct UnknownPawStyle(pub String);
