use crate::config::Roster;
use crate::reducer::reduce;
use crate::types::{MatchEvent, MatchState};

/// Append-only chronological event log with a derived snapshot.
///
/// The feed owns the ordered list of everything received so far and re-runs
/// the reducer over the full list on every arrival, so the snapshot can
/// never drift from the events that produced it. At cricket-ball cadence the
/// O(n) recompute per arrival is negligible.
#[derive(Debug, Clone)]
pub struct MatchFeed {
    roster: Roster,
    events: Vec<MatchEvent>,
    state: MatchState,
}

impl MatchFeed {
    /// Create an empty feed for the given fixture
    pub fn new(roster: Roster) -> Self {
        let state = MatchState::initial(&roster);
        Self {
            roster,
            events: Vec::new(),
            state,
        }
    }

    /// Append an event and re-project the snapshot from the full history
    pub fn push(&mut self, event: MatchEvent) -> &MatchState {
        self.events.push(event);
        self.state = reduce(&self.events, &self.roster);
        &self.state
    }

    /// Current derived snapshot
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// All events in arrival (chronological) order
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    /// Events newest-first, the order a live commentary view renders them
    pub fn latest_first(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter().rev()
    }

    /// The fixture this feed scores against
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Drop all accumulated events and reset the snapshot
    pub fn clear(&mut self) {
        self.events.clear();
        self.state = MatchState::initial(&self.roster);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
