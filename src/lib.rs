//! # cricket-feed-rs
//!
//! A Rust client library for a live cricket match feed: it subscribes to a
//! simulated broadcast over a persistent WebSocket connection, folds the
//! ordered event stream into a derived match state, and hands both the feed
//! and the scoreboard snapshot to whatever renders them.
//!
//! The server is the scoring authority; this client only replays and
//! derives. The two load-bearing pieces are:
//!
//! - **Reducer** ([`reduce`]/[`apply`]): a pure fold from the chronological
//!   event list to a [`MatchState`], including wicket substitution and
//!   innings-change rules driven by an injected [`Roster`]
//! - **Connection manager** ([`ConnectionManager`]): the
//!   `Disconnected → Connecting → Connected` state machine with multi-
//!   subscriber event/state/error feeds, bounded reconnection, and history
//!   replay through the ordinary event path
//!
//! ## Example
//!
//! ```no_run
//! use cricket_feed_rs::{ConnectionManager, MatchFeed, Roster, SocketConfig};
//! use std::sync::{Arc, Mutex};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConnectionManager::new(SocketConfig::new("wss://feed.example.com"))?;
//! let feed = Arc::new(Mutex::new(MatchFeed::new(Roster::demo())));
//!
//! let sink = Arc::clone(&feed);
//! let _events = manager.subscribe_events(move |event| {
//!     let mut feed = sink.lock().unwrap();
//!     let state = feed.push(event.clone());
//!     println!("{}/{} after {} overs", state.total_runs, state.wickets, state.overs_display());
//! });
//!
//! manager.connect();
//! tokio::signal::ctrl_c().await?;
//! manager.disconnect();
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod feed;
pub mod reducer;
pub mod types;
pub mod websocket;

// Re-export commonly used types
pub use config::{Roster, SocketConfig};
pub use error::{Error, Result};
pub use feed::MatchFeed;
pub use reducer::{apply, reduce};
pub use types::{
    DeliveryPayload, EventKind, MatchEvent, MatchState, PlayerStats, StatusPayload, WicketPayload,
};

// Re-export the connection layer
pub use websocket::{ConnectionManager, ConnectionState, FeedWsClient, RetryPolicy, Subscription};
