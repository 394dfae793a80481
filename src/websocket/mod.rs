//! WebSocket connection layer for the match feed.
//!
//! This module provides:
//! - [`FeedWsClient`]: opens one connection and decodes wire envelopes
//! - [`ConnectionManager`]: the connection state machine, subscriber feeds,
//!   and the automatic post-connect join
//! - [`RetryPolicy`]: the bounded fixed-delay reconnection schedule
//!
//! # Connection Management
//!
//! The broadcast server drops idle or flaky connections without warning.
//! [`ConnectionManager`] absorbs that: it retries per [`RetryPolicy`],
//! surfaces every state transition on its state feed, and replays requested
//! match history through the ordinary event feed so consumers never need a
//! separate code path for reconnects.

mod client;
mod manager;
mod retry;

pub use client::{FeedWsClient, WireMessage, WireSink};
pub use manager::{ConnectionManager, ConnectionState, Subscription};
pub use retry::RetryPolicy;
