//! Real-time Message Types
//!
//! Every frame on the socket is a JSON text frame shaped
//! `{"event": "<name>", "data": <payload>}`.

use serde::{Deserialize, Serialize};

use crate::model::{Badge, GlobalStats, PawStyle, UserId};

/// Events pushed by the server
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Server acknowledged our session
    Connected(ConnectedAck),
    /// Someone booped us
    BoopReceived(BoopReceived),
    /// Confirmation of a boop we sent
    BoopSent(BoopSent),
    /// Badges awarded after our last boop
    BadgesUnlocked(BadgesUnlocked),
    /// New site-wide counters
    GlobalStatsUpdate(GlobalStats),
}

/// Events sent by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Boop a user. Without a paw the server uses our profile's paw.
    SendBoop {
        recipient_id: UserId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        paw_style: Option<PawStyle>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedAck {
    pub user_id: UserId,
}

/// Who booped us
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoopSender {
    pub id: UserId,
    pub display_name: String,
    #[serde(default)]
    pub color_theme: Option<String>,
    #[serde(default)]
    pub paw_style: PawStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoopReceived {
    pub sender: BoopSender,
    #[serde(default)]
    pub boop_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_stats: Option<GlobalStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoopSent {
    pub success: bool,
    #[serde(default)]
    pub recipient_id: Option<UserId>,
    #[serde(default)]
    pub new_badges: Vec<Badge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_stats: Option<GlobalStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgesUnlocked {
    #[serde(default)]
    pub badges: Vec<Badge>,
}

/// What the connection hands to the event loop
#[derive(Debug, Clone, PartialEq)]
pub enum RealtimeEvent {
    /// Socket handshake completed
    Connect,
    /// Socket gone; carries the close reason when the server gave one
    Disconnect { reason: Option<String> },
    Server(ServerEvent),
}

#[derive(Deserialize)]
struct Envelope {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl ServerEvent {
    /// Decode a text frame. Well-formed frames for events this client does
    /// not know about decode to `None`.
    pub fn decode(text: &str) -> Result<Option<Self>, serde_json::Error> {
        let envelope: Envelope = serde_json::from_str(text)?;
        let event = match envelope.event.as_str() {
            "connected" => ServerEvent::Connected(serde_json::from_value(envelope.data)?),
            "boop_received" => ServerEvent::BoopReceived(serde_json::from_value(envelope.data)?),
            "boop_sent" => ServerEvent::BoopSent(serde_json::from_value(envelope.data)?),
            "badges_unlocked" => {
                ServerEvent::BadgesUnlocked(serde_json::from_value(envelope.data)?)
            }
            "global_stats_update" => {
                ServerEvent::GlobalStatsUpdate(serde_json::from_value(envelope.data)?)
            }
            _ => return Ok(None),
        };
        Ok(Some(event))
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Connected(_) => "connected",
            ServerEvent::BoopReceived(_) => "boop_received",
            ServerEvent::BoopSent(_) => "boop_sent",
            ServerEvent::BadgesUnlocked(_) => "badges_unlocked",
            ServerEvent::GlobalStatsUpdate(_) => "global_stats_update",
        }
    }
}

impl ClientEvent {
    pub fn send_boop(recipient_id: UserId) -> Self {
        ClientEvent::SendBoop {
            recipient_id,
            paw_style: None,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_boop_received() {
        let json = r##"{"event": "boop_received", "data": {
            "sender": {"id": 2, "display_name": "Two", "color_theme": "#FF69B4", "paw_style": "ghost"},
            "boop_id": 77
        }}"##;
        match ServerEvent::decode(json).unwrap() {
            Some(ServerEvent::BoopReceived(received)) => {
                assert_eq!(received.sender.id, 2);
                assert_eq!(received.sender.paw_style, PawStyle::Ghost);
                assert_eq!(received.boop_id, Some(77));
                assert!(received.global_stats.is_none());
            }
            other => panic!("Expected BoopReceived, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_boop_sent_with_badges() {
        let json = r#"{"event": "boop_sent", "data": {
            "success": true, "recipient_id": 3,
            "new_badges": [{"name": "Booper", "description": "Send 10 boops", "icon": "🏅", "unlocks_paw": "star"}]
        }}"#;
        match ServerEvent::decode(json).unwrap() {
            Some(ServerEvent::BoopSent(sent)) => {
                assert!(sent.success);
                assert_eq!(sent.new_badges.len(), 1);
                assert_eq!(sent.new_badges[0].unlocks_paw, Some(PawStyle::Star));
            }
            other => panic!("Expected BoopSent, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_global_stats_update() {
        let json = r#"{"event": "global_stats_update", "data": {"total_boops": 99, "total_users": 4, "last_updated": null}}"#;
        let event = ServerEvent::decode(json).unwrap().unwrap();
        assert_eq!(event.name(), "global_stats_update");
        assert!(matches!(event, ServerEvent::GlobalStatsUpdate(stats) if stats.total_boops == 99));
    }

    #[test]
    fn test_decode_badges_unlocked() {
        let json = r#"{"event": "badges_unlocked", "data": {"badges": [
            {"name": "Popular", "description": "Get booped 10 times", "icon": "⭐", "unlocks_paw": "heart"},
            {"name": "Night Owl", "description": "Boop after midnight", "icon": "🦉"}
        ]}}"#;
        match ServerEvent::decode(json).unwrap() {
            Some(ServerEvent::BadgesUnlocked(unlocked)) => {
                assert_eq!(unlocked.badges.len(), 2);
                assert_eq!(unlocked.badges[0].name, "Popular");
                assert_eq!(unlocked.badges[0].unlocks_paw, Some(PawStyle::Heart));
                assert_eq!(unlocked.badges[1].unlocks_paw, None);
            }
            other => panic!("Expected BadgesUnlocked, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_connected_ack() {
        let json = r#"{"event": "connected", "data": {"user_id": 1}}"#;
        let event = ServerEvent::decode(json).unwrap();
        assert_eq!(event, Some(ServerEvent::Connected(ConnectedAck { user_id: 1 })));
        assert_eq!(event.map(|e| e.name()), Some("connected"));
    }

    #[test]
    fn test_unknown_event_is_ignored() {
        let json = r#"{"event": "typing", "data": {"user_id": 1}}"#;
        assert_eq!(ServerEvent::decode(json).unwrap(), None);
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        assert!(ServerEvent::decode("not json").is_err());
        assert!(ServerEvent::decode(r#"{"event": "connected", "data": {}}"#).is_err());
    }

    #[test]
    fn test_encode_then_decode_server_event() {
        let event = ServerEvent::Connected(ConnectedAck { user_id: 12 });
        let text = event.encode().unwrap();
        assert!(text.contains("\"event\":\"connected\""));
        assert_eq!(ServerEvent::decode(&text).unwrap(), Some(event));
    }

    #[test]
    fn test_client_send_boop_frame() {
        let text = ClientEvent::send_boop(5).encode().unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"event": "send_boop", "data": {"recipient_id": 5}})
        );
    }
}
