use std::collections::{HashMap, HashSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection options for the match feed socket.
///
/// Mirrors the knobs exposed by the broadcast server: where to connect,
/// which transports to prefer, how long to wait for the handshake, and how
/// aggressively to reconnect after a transport-level drop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocketConfig {
    /// WebSocket endpoint of the broadcast server
    pub url: String,

    /// Transport preference list, most preferred first
    #[serde(default = "SocketConfig::default_transports")]
    pub transports: Vec<String>,

    /// Handshake timeout in milliseconds
    #[serde(default = "SocketConfig::default_timeout_ms")]
    pub timeout_ms: u64,

    /// Always open a fresh connection instead of reusing one
    #[serde(default)]
    pub force_new: bool,

    /// Number of automatic reconnection attempts after a transport drop
    #[serde(default = "SocketConfig::default_reconnection_attempts")]
    pub reconnection_attempts: u32,

    /// Fixed delay between reconnection attempts, in milliseconds
    #[serde(default = "SocketConfig::default_reconnection_delay_ms")]
    pub reconnection_delay_ms: u64,

    /// Settle delay between "connected" and the automatic join, in milliseconds
    #[serde(default = "SocketConfig::default_join_delay_ms")]
    pub join_delay_ms: u64,

    /// Match joined automatically once the connection settles
    #[serde(default = "SocketConfig::default_match_id")]
    pub default_match_id: String,
}

impl SocketConfig {
    /// Create a config for the given endpoint with default options
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            transports: Self::default_transports(),
            timeout_ms: Self::default_timeout_ms(),
            force_new: false,
            reconnection_attempts: Self::default_reconnection_attempts(),
            reconnection_delay_ms: Self::default_reconnection_delay_ms(),
            join_delay_ms: Self::default_join_delay_ms(),
            default_match_id: Self::default_match_id(),
        }
    }

    /// Handshake timeout as a [`Duration`]
    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Delay between reconnection attempts as a [`Duration`]
    pub fn reconnection_delay(&self) -> Duration {
        Duration::from_millis(self.reconnection_delay_ms)
    }

    /// Post-connect settle delay as a [`Duration`]
    pub fn join_delay(&self) -> Duration {
        Duration::from_millis(self.join_delay_ms)
    }

    fn default_transports() -> Vec<String> {
        vec!["websocket".to_string()]
    }

    fn default_timeout_ms() -> u64 {
        15_000
    }

    fn default_reconnection_attempts() -> u32 {
        5
    }

    fn default_reconnection_delay_ms() -> u64 {
        2_000
    }

    fn default_join_delay_ms() -> u64 {
        500
    }

    fn default_match_id() -> String {
        "match_123".to_string()
    }
}

/// Match-specific roster tables consulted by the reducer.
///
/// These are fixture configuration, not derived data: the batting order, the
/// substitution table, the innings-change openers, and display-name
/// canonicalization all vary per match and are injected rather than coded
/// inline, so a different fixture only needs a different `Roster` value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    /// Opening batting pair at the start of the match
    pub opening_pair: [String; 2],

    /// Who walks in when a given batsman is dismissed
    #[serde(default)]
    pub next_batsman: HashMap<String, String>,

    /// Status labels that hard-reset the batting pair (innings change),
    /// mapped to the fresh opening pair
    #[serde(default)]
    pub innings_change: HashMap<String, [String; 2]>,

    /// Canonical display names for bowlers; unknown names pass through
    #[serde(default)]
    pub bowler_names: HashMap<String, String>,

    /// Full display names for batsmen; unknown names pass through
    #[serde(default)]
    pub batsman_names: HashMap<String, String>,

    /// Side batting first
    #[serde(default)]
    pub home_team: String,

    /// Side batting second
    #[serde(default)]
    pub away_team: String,

    /// Status labels indicating the second innings is under way
    #[serde(default)]
    pub second_innings_statuses: HashSet<String>,
}

impl Roster {
    /// Substitute for a dismissed batsman, if the table defines one
    pub fn substitute_for(&self, player: &str) -> Option<&str> {
        self.next_batsman.get(player).map(String::as_str)
    }

    /// Fresh opening pair triggered by a status label, if any
    pub fn innings_change_for(&self, status: &str) -> Option<&[String; 2]> {
        self.innings_change.get(status)
    }

    /// Canonical display name for a bowler
    pub fn bowler_display<'a>(&'a self, raw: &'a str) -> &'a str {
        self.bowler_names.get(raw).map(String::as_str).unwrap_or(raw)
    }

    /// Full display name for a batsman
    pub fn batsman_display<'a>(&'a self, raw: &'a str) -> &'a str {
        self.batsman_names
            .get(raw)
            .map(String::as_str)
            .unwrap_or(raw)
    }

    /// Label of the side batting while the given status is current
    pub fn batting_team(&self, status: &str) -> &str {
        if self.second_innings_statuses.contains(status) {
            &self.away_team
        } else {
            &self.home_team
        }
    }

    /// The India v South Africa demo fixture used by the simulated broadcast
    pub fn demo() -> Self {
        let pair = |a: &str, b: &str| [a.to_string(), b.to_string()];
        let next_batsman = [
            ("R. Sharma", "R. Pant"),
            ("R. Pant", "S. Yadav"),
            ("S. Yadav", "H. Pandya"),
            ("H. Pandya", "R. Jadeja"),
            ("Q. de Kock", "A. Markram"),
            ("R. Hendricks", "A. Markram"),
            ("A. Markram", "H. Klaasen"),
            ("H. Klaasen", "D. Miller"),
            ("D. Miller", "M. Jansen"),
        ]
        .into_iter()
        .map(|(out, sub)| (out.to_string(), sub.to_string()))
        .collect();

        let innings_change = [("Chase Begins".to_string(), pair("Q. de Kock", "R. Hendricks"))]
            .into_iter()
            .collect();

        let batsman_names = [
            ("V. Kohli", "Virat Kohli"),
            ("R. Jadeja", "Ravindra Jadeja"),
            ("R. Sharma", "Rohit Sharma"),
            ("R. Pant", "Rishabh Pant"),
            ("S. Yadav", "Suryakumar Yadav"),
            ("H. Pandya", "Hardik Pandya"),
            ("Q. de Kock", "Quinton de Kock"),
            ("R. Hendricks", "Reeza Hendricks"),
            ("A. Markram", "Aiden Markram"),
            ("H. Klaasen", "Heinrich Klaasen"),
            ("D. Miller", "David Miller"),
            ("M. Jansen", "Marco Jansen"),
            ("K. Maharaj", "Keshav Maharaj"),
            ("T. Shamsi", "Tabraiz Shamsi"),
        ]
        .into_iter()
        .map(|(short, full)| (short.to_string(), full.to_string()))
        .collect();

        let bowler_names = [
            "K. Rabada",
            "A. Nortje",
            "L. Ngidi",
            "M. Jansen",
            "K. Maharaj",
            "T. Shamsi",
        ]
        .into_iter()
        .map(|name| (name.to_string(), name.to_string()))
        .collect();

        let second_innings_statuses = [
            "Chase Begins",
            "SA Powerplay End",
            "Key Wicket",
            "Equation",
            "Crunch Time",
            "Massive Wicket",
            "Final Over",
        ]
        .into_iter()
        .map(str::to_string)
        .collect();

        Self {
            opening_pair: pair("R. Sharma", "V. Kohli"),
            next_batsman,
            innings_change,
            bowler_names,
            batsman_names,
            home_team: "India".to_string(),
            away_team: "South Africa".to_string(),
            second_innings_statuses,
        }
    }
}
