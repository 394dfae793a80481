use std::pin::Pin;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::config::SocketConfig;
use crate::error::{Error, Result};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Named message envelope exchanged with the broadcast server.
///
/// Every frame in either direction is `{ "event": <name>, "data": <value> }`;
/// the message names themselves are fixed by the server protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl WireMessage {
    /// Create a message with the given name and payload
    pub fn named(event: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    /// Ask the server to start streaming events for a match
    pub fn join_match(match_id: &str) -> Self {
        Self::named("join_match", serde_json::json!({ "matchId": match_id }))
    }

    /// Ask the server to stop streaming events for a match
    pub fn leave_match(match_id: &str) -> Self {
        Self::named("leave_match", serde_json::json!({ "matchId": match_id }))
    }

    /// Ask the server to replay every event since match start
    pub fn get_match_history(match_id: &str) -> Self {
        Self::named("get_match_history", serde_json::json!({ "matchId": match_id }))
    }
}

/// Write half of an open feed connection
pub struct WireSink {
    inner: WsSink,
}

impl WireSink {
    /// Serialize and send one envelope
    pub async fn send(&mut self, msg: &WireMessage) -> Result<()> {
        let text = serde_json::to_string(msg)?;
        self.inner
            .send(Message::Text(text))
            .await
            .map_err(|e| Error::WebSocket(e.to_string()))
    }
}

/// Low-level WebSocket client for the match feed endpoint.
///
/// Opens the connection, enforces the handshake timeout, and turns the raw
/// frame stream into parsed [`WireMessage`] envelopes. Session lifecycle
/// (reconnection, subscriber fan-out, the join handshake) lives in
/// [`ConnectionManager`](crate::websocket::ConnectionManager).
#[derive(Debug, Clone)]
pub struct FeedWsClient {
    ws_url: String,
    handshake_timeout: Duration,
}

impl FeedWsClient {
    /// Create a client from the socket configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the transport preference list does not
    /// include `websocket` (the only transport this client speaks).
    pub fn from_config(config: &SocketConfig) -> Result<Self> {
        if !config.transports.iter().any(|t| t == "websocket") {
            return Err(Error::Config(
                "transport preference list does not include websocket".to_string(),
            ));
        }

        Ok(Self {
            ws_url: config.url.clone(),
            handshake_timeout: config.handshake_timeout(),
        })
    }

    /// Create a client for the given endpoint with a default handshake timeout
    pub fn with_url(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
            handshake_timeout: Duration::from_secs(15),
        }
    }

    /// Endpoint this client connects to
    pub fn url(&self) -> &str {
        &self.ws_url
    }

    /// Open one connection to the feed endpoint.
    ///
    /// Returns the write half and a stream of parsed envelopes. The stream
    /// yields [`Error::ConnectionClosed`] when the server closes the
    /// connection and [`Error::Json`] for frames that do not parse; only the
    /// former ends the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or the
    /// handshake does not complete within the configured timeout.
    pub async fn open(
        &self,
    ) -> Result<(
        WireSink,
        Pin<Box<dyn Stream<Item = Result<WireMessage>> + Send>>,
    )> {
        let (ws_stream, _) = tokio::time::timeout(self.handshake_timeout, connect_async(&self.ws_url))
            .await
            .map_err(|_| Error::HandshakeTimeout)??;

        let (write, read) = ws_stream.split();

        let stream = read.filter_map(|msg| async move { decode_frame(msg) });

        Ok((WireSink { inner: write }, Box::pin(stream)))
    }
}

/// Turn one raw WebSocket frame into an envelope, or filter it out.
fn decode_frame(
    msg: std::result::Result<Message, tokio_tungstenite::tungstenite::Error>,
) -> Option<Result<WireMessage>> {
    match msg {
        Ok(Message::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return None;
            }

            // Some servers send keep-alives as text frames
            if trimmed.eq_ignore_ascii_case("ping") || trimmed.eq_ignore_ascii_case("pong") {
                return None;
            }

            match serde_json::from_str::<WireMessage>(&text) {
                Ok(envelope) => Some(Ok(envelope)),
                Err(e) => Some(Err(Error::Json(e))),
            }
        }
        Ok(Message::Close(_)) => Some(Err(Error::ConnectionClosed)),
        Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
            // Handled automatically by the transport
            None
        }
        Ok(Message::Binary(_)) => Some(Err(Error::WebSocket(
            "Unexpected binary message".to_string(),
        ))),
        Ok(Message::Frame(_)) => None,
        Err(e) => Some(Err(Error::WebSocket(e.to_string()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config() {
        let config = SocketConfig::new("wss://feed.example.com/ws");
        let client = FeedWsClient::from_config(&config).unwrap();
        assert_eq!(client.url(), "wss://feed.example.com/ws");
        assert_eq!(client.handshake_timeout, Duration::from_millis(15_000));
    }

    #[test]
    fn test_client_rejects_unsupported_transports() {
        let mut config = SocketConfig::new("wss://feed.example.com/ws");
        config.transports = vec!["polling".to_string()];
        assert!(matches!(
            FeedWsClient::from_config(&config),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_outbound_message_shapes() {
        let msg = WireMessage::join_match("match_123");
        assert_eq!(msg.event, "join_match");
        assert_eq!(msg.data["matchId"], "match_123");

        assert_eq!(WireMessage::leave_match("m").event, "leave_match");
        assert_eq!(
            WireMessage::get_match_history("m").event,
            "get_match_history"
        );
    }

    #[test]
    fn test_decode_text_frame() {
        let frame = Ok(Message::Text(
            r#"{ "event": "ball_event", "data": { "type": "BALL", "payload": { "runs": 1 } } }"#
                .to_string(),
        ));
        let envelope = decode_frame(frame).unwrap().unwrap();
        assert_eq!(envelope.event, "ball_event");
        assert_eq!(envelope.data["type"], "BALL");
    }

    #[test]
    fn test_decode_envelope_without_data() {
        let frame = Ok(Message::Text(r#"{ "event": "reconnect" }"#.to_string()));
        let envelope = decode_frame(frame).unwrap().unwrap();
        assert_eq!(envelope.event, "reconnect");
        assert!(envelope.data.is_null());
    }

    #[test]
    fn test_decode_skips_keepalives_and_empty_frames() {
        assert!(decode_frame(Ok(Message::Text("  ".to_string()))).is_none());
        assert!(decode_frame(Ok(Message::Text("PING".to_string()))).is_none());
        assert!(decode_frame(Ok(Message::Ping(Vec::new()))).is_none());
    }

    #[test]
    fn test_decode_close_frame() {
        assert!(matches!(
            decode_frame(Ok(Message::Close(None))),
            Some(Err(Error::ConnectionClosed))
        ));
    }

    #[test]
    fn test_decode_unparseable_frame() {
        assert!(matches!(
            decode_frame(Ok(Message::Text("not json".to_string()))),
            Some(Err(Error::Json(_)))
        ));
    }
}
