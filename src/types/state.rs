use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::Roster;

/// Per-batsman scoring line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerStats {
    pub runs: u32,
    pub balls: u32,
    pub is_out: bool,
}

/// Derived snapshot of the match.
///
/// Never mutated in place by consumers: the reducer recomputes it in full
/// from the entire event list on every arrival, so two snapshots built from
/// the same sequence are always equal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub total_runs: u32,
    pub wickets: u32,
    pub balls: u32,
    pub current_batsmen: [String; 2],
    pub current_bowler: String,
    pub match_status: String,
    pub player_stats: HashMap<String, PlayerStats>,
}

impl MatchState {
    /// State before any event has been applied: the configured opening pair
    /// at the crease, nothing on the board.
    pub fn initial(roster: &Roster) -> Self {
        Self {
            total_runs: 0,
            wickets: 0,
            balls: 0,
            current_batsmen: roster.opening_pair.clone(),
            current_bowler: String::new(),
            match_status: "Not Started".to_string(),
            player_stats: HashMap::new(),
        }
    }

    /// Completed overs
    pub fn overs(&self) -> u32 {
        self.balls / 6
    }

    /// Balls bowled in the current over
    pub fn balls_this_over(&self) -> u32 {
        self.balls % 6
    }

    /// Overs in the conventional "O.B" display form
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.overs(), self.balls_this_over())
    }

    /// Runs per over; zero before the first ball. Two-decimal formatting is
    /// left to the presentation layer.
    pub fn run_rate(&self) -> f64 {
        if self.balls > 0 {
            f64::from(self.total_runs) / (f64::from(self.balls) / 6.0)
        } else {
            0.0
        }
    }

    /// Scoring line for a player; zeroed stats for anyone yet to face a ball
    pub fn player_stats(&self, player: &str) -> PlayerStats {
        self.player_stats.get(player).copied().unwrap_or_default()
    }
}
