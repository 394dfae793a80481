use chrono::Utc;
use serde::de::Deserializer;
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payload of a scoring delivery (`BALL` or `BOUNDARY`).
///
/// Every field is optional on the wire; missing scalars default so a sparse
/// payload still contributes what it can instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DeliveryPayload {
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub commentary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batsman: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball: Option<u32>,
}

/// Payload of a `WICKET` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WicketPayload {
    #[serde(rename = "playerOut", default)]
    pub player_out: String,
    #[serde(default)]
    pub dismissal: String,
    #[serde(default)]
    pub commentary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bowler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub over: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ball: Option<u32>,
}

/// Payload of a `MATCH_STATUS` event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StatusPayload {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub summary: String,
}

/// The kind of a match event, discriminated by the wire `type` field.
///
/// The set is open: any unrecognized `type`, or a recognized `type` whose
/// payload does not parse, lands in [`EventKind::Unknown`] with the raw
/// payload preserved. Consumers must render or skip unknowns gracefully.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Ball(DeliveryPayload),
    Boundary(DeliveryPayload),
    Wicket(WicketPayload),
    MatchStatus(StatusPayload),
    Unknown {
        kind: String,
        payload: serde_json::Value,
    },
}

impl EventKind {
    /// The wire `type` label for this kind
    pub fn label(&self) -> &str {
        match self {
            EventKind::Ball(_) => "BALL",
            EventKind::Boundary(_) => "BOUNDARY",
            EventKind::Wicket(_) => "WICKET",
            EventKind::MatchStatus(_) => "MATCH_STATUS",
            EventKind::Unknown { kind, .. } => kind,
        }
    }
}

/// A single event in the match feed.
///
/// `id` and `timestamp` are optional on the wire. The connection manager
/// assigns both at delivery time when absent (see
/// [`MatchEvent::ensure_stamped`]) so identity is stable across re-renders;
/// the reducer itself never looks at either field.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchEvent {
    pub id: Option<String>,
    pub timestamp: Option<i64>,
    pub kind: EventKind,
}

impl MatchEvent {
    /// Create an unstamped event of the given kind
    pub fn new(kind: EventKind) -> Self {
        Self {
            id: None,
            timestamp: None,
            kind,
        }
    }

    /// Set the event id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the arrival timestamp (UTC milliseconds)
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Fill in a fresh id and arrival timestamp for any field the server
    /// left blank. Server-supplied values are never overwritten.
    pub fn ensure_stamped(&mut self) {
        if self.id.is_none() {
            self.id = Some(Uuid::new_v4().to_string());
        }
        if self.timestamp.is_none() {
            self.timestamp = Some(Utc::now().timestamp_millis());
        }
    }
}

// Wire shape: { "type": "...", "payload": {...}, "timestamp"?: ms, "id"?: str }
#[derive(Serialize, Deserialize)]
struct RawEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl From<RawEvent> for MatchEvent {
    fn from(raw: RawEvent) -> Self {
        let kind = match raw.kind.as_str() {
            "BALL" => serde_json::from_value(raw.payload.clone())
                .map(EventKind::Ball)
                .ok(),
            "BOUNDARY" => serde_json::from_value(raw.payload.clone())
                .map(EventKind::Boundary)
                .ok(),
            "WICKET" => serde_json::from_value(raw.payload.clone())
                .map(EventKind::Wicket)
                .ok(),
            "MATCH_STATUS" => serde_json::from_value(raw.payload.clone())
                .map(EventKind::MatchStatus)
                .ok(),
            _ => None,
        }
        .unwrap_or(EventKind::Unknown {
            kind: raw.kind,
            payload: raw.payload,
        });

        MatchEvent {
            id: raw.id,
            timestamp: raw.timestamp,
            kind,
        }
    }
}

impl<'de> Deserialize<'de> for MatchEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawEvent::deserialize(deserializer).map(MatchEvent::from)
    }
}

impl Serialize for MatchEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let payload = match &self.kind {
            EventKind::Ball(p) | EventKind::Boundary(p) => {
                serde_json::to_value(p).map_err(S::Error::custom)?
            }
            EventKind::Wicket(p) => serde_json::to_value(p).map_err(S::Error::custom)?,
            EventKind::MatchStatus(p) => serde_json::to_value(p).map_err(S::Error::custom)?,
            EventKind::Unknown { payload, .. } => payload.clone(),
        };

        RawEvent {
            kind: self.kind.label().to_string(),
            payload,
            timestamp: self.timestamp,
            id: self.id.clone(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ball_event_roundtrip() {
        let json = r#"{
            "type": "BALL",
            "payload": { "runs": 1, "commentary": "pushed to mid-on", "batsman": "R. Sharma", "bowler": "K. Rabada" },
            "timestamp": 1700000000000,
            "id": "evt-1"
        }"#;

        let event: MatchEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.id.as_deref(), Some("evt-1"));
        assert_eq!(event.timestamp, Some(1_700_000_000_000));
        match &event.kind {
            EventKind::Ball(p) => {
                assert_eq!(p.runs, 1);
                assert_eq!(p.batsman.as_deref(), Some("R. Sharma"));
            }
            other => panic!("expected BALL, got {:?}", other),
        }

        let back: MatchEvent =
            serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_sparse_payload_defaults() {
        let event: MatchEvent =
            serde_json::from_str(r#"{ "type": "BOUNDARY", "payload": { "runs": 4 } }"#).unwrap();
        match event.kind {
            EventKind::Boundary(p) => {
                assert_eq!(p.runs, 4);
                assert_eq!(p.commentary, "");
                assert!(p.batsman.is_none());
            }
            other => panic!("expected BOUNDARY, got {:?}", other),
        }
        assert!(event.id.is_none());
        assert!(event.timestamp.is_none());
    }

    #[test]
    fn test_unknown_type_preserves_payload() {
        let event: MatchEvent = serde_json::from_str(
            r#"{ "type": "TIMEOUT", "payload": { "duration": 150 } }"#,
        )
        .unwrap();
        match &event.kind {
            EventKind::Unknown { kind, payload } => {
                assert_eq!(kind, "TIMEOUT");
                assert_eq!(payload["duration"], 150);
            }
            other => panic!("expected Unknown, got {:?}", other),
        }
        assert_eq!(event.kind.label(), "TIMEOUT");
    }

    #[test]
    fn test_malformed_known_payload_degrades_to_unknown() {
        // runs is the wrong JSON type, so the BALL payload does not parse
        let event: MatchEvent =
            serde_json::from_str(r#"{ "type": "BALL", "payload": { "runs": "four" } }"#).unwrap();
        assert!(matches!(event.kind, EventKind::Unknown { .. }));
    }

    #[test]
    fn test_missing_payload_field() {
        let event: MatchEvent = serde_json::from_str(r#"{ "type": "MATCH_STATUS" }"#).unwrap();
        assert!(matches!(event.kind, EventKind::Unknown { .. }));
    }

    #[test]
    fn test_ensure_stamped_preserves_server_values() {
        let mut event = MatchEvent::new(EventKind::MatchStatus(StatusPayload::default()))
            .with_id("server-id")
            .with_timestamp(42);
        event.ensure_stamped();
        assert_eq!(event.id.as_deref(), Some("server-id"));
        assert_eq!(event.timestamp, Some(42));
    }

    #[test]
    fn test_ensure_stamped_fills_missing_values() {
        let mut event = MatchEvent::new(EventKind::Ball(DeliveryPayload::default()));
        event.ensure_stamped();
        assert!(event.id.is_some());
        assert!(event.timestamp.is_some());
    }
}
