//! Recent-activity classification for user cards

use chrono::Duration;

use crate::model::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    /// Seen within the last 5 minutes
    Active,
    /// Seen within the last hour
    Recent,
    Idle,
}

impl Activity {
    pub fn classify(last_active: Option<Timestamp>, now: Timestamp) -> Self {
        let Some(last_active) = last_active else {
            return Activity::Idle;
        };

        let since = now - last_active;
        if since < Duration::minutes(5) {
            Activity::Active
        } else if since < Duration::minutes(60) {
            Activity::Recent
        } else {
            Activity::Idle
        }
    }

    /// Marker shown in front of a user card
    pub fn marker(self) -> &'static str {
        match self {
            Activity::Active => "●",
            Activity::Recent => "○",
            Activity::Idle => " ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_thresholds() {
        let now = Utc::now();
        assert_eq!(
            Activity::classify(Some(now - Duration::minutes(1)), now),
            Activity::Active
        );
        assert_eq!(
            Activity::classify(Some(now - Duration::minutes(5)), now),
            Activity::Recent
        );
        assert_eq!(
            Activity::classify(Some(now - Duration::minutes(59)), now),
            Activity::Recent
        );
        assert_eq!(
            Activity::classify(Some(now - Duration::hours(3)), now),
            Activity::Idle
        );
        assert_eq!(Activity::classify(None, now), Activity::Idle);
    }
}
