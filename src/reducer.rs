//! The event-to-state fold.
//!
//! [`reduce`] projects the full chronological event list into a
//! [`MatchState`]; [`apply`] is the single step it folds with. Both are pure:
//! no shared state, no I/O, and no failure path. A malformed or unrecognized
//! event contributes nothing and never aborts the fold, so the feed stays
//! renderable no matter what the server sends.
//!
//! Callers must feed events oldest-first. Later events depend on state
//! implied by earlier ones (the batsman at the crease when a wicket falls),
//! so order is the only thing the reducer trusts; event ids are ignored and
//! re-delivered history is folded positionally like any other sequence.

use crate::config::Roster;
use crate::types::{EventKind, MatchEvent, MatchState, PlayerStats};

/// Fold a chronological event sequence into a match snapshot.
///
/// Equivalent to starting from [`MatchState::initial`] and calling [`apply`]
/// once per event, in order.
pub fn reduce<'a, I>(events: I, roster: &Roster) -> MatchState
where
    I: IntoIterator<Item = &'a MatchEvent>,
{
    let mut state = MatchState::initial(roster);
    for event in events {
        apply(&mut state, event, roster);
    }
    state
}

/// Apply a single event to the running state.
pub fn apply(state: &mut MatchState, event: &MatchEvent, roster: &Roster) {
    match &event.kind {
        EventKind::Ball(payload) | EventKind::Boundary(payload) => {
            if let Some(batsman) = &payload.batsman {
                let stats = state
                    .player_stats
                    .entry(batsman.clone())
                    .or_insert_with(PlayerStats::default);
                stats.runs = stats.runs.saturating_add(payload.runs);
                stats.balls = stats.balls.saturating_add(1);
            }

            // Most recent delivery's bowler is authoritative
            if let Some(bowler) = &payload.bowler {
                state.current_bowler = roster.bowler_display(bowler).to_string();
            }

            // Saturating: an absurd `runs` value from the server clamps the
            // totals instead of panicking the fold
            state.total_runs = state.total_runs.saturating_add(payload.runs);
            state.balls = state.balls.saturating_add(1);
        }

        EventKind::Wicket(payload) => {
            if let Some(bowler) = &payload.bowler {
                state.current_bowler = roster.bowler_display(bowler).to_string();
            }

            if let Some(stats) = state.player_stats.get_mut(&payload.player_out) {
                stats.is_out = true;
            }

            if let Some(slot) = state
                .current_batsmen
                .iter()
                .position(|batsman| *batsman == payload.player_out)
            {
                // No configured substitute leaves the slot unchanged; the
                // server remains authoritative for the end of an innings.
                if let Some(next) = roster.substitute_for(&payload.player_out) {
                    state.current_batsmen[slot] = next.to_string();
                }
            }

            state.wickets = state.wickets.saturating_add(1);
            state.balls = state.balls.saturating_add(1);
        }

        EventKind::MatchStatus(payload) => {
            state.match_status = payload.status.clone();
            if let Some(openers) = roster.innings_change_for(&payload.status) {
                state.current_batsmen = openers.clone();
            }
        }

        EventKind::Unknown { .. } => {}
    }
}
