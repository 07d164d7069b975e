//! MatchSession, SessionState and MatchError.

use crate::models::finished_match::MatchId;
use crate::models::live_match::LiveMatch;
use crate::models::team::TeamSide;
use chrono::{DateTime, Utc};

/// Errors that can occur while scoring a match. None of them change session state.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MatchError {
    /// A player name is empty after trimming (slot is 0 or 1).
    EmptyPlayerName { side: TeamSide, slot: usize },
    /// Finishing with both scores at zero.
    NoScoresRecorded,
    /// The operation needs a match in progress and there is none.
    NoMatchInProgress,
    /// Starting while another match is still being scored.
    MatchInProgress,
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::EmptyPlayerName { side, slot } => write!(
                f,
                "Please enter all player names ({} player {} is empty)",
                side,
                slot + 1
            ),
            MatchError::NoScoresRecorded => {
                write!(f, "No scores recorded: record some points before finishing the match")
            }
            MatchError::NoMatchInProgress => write!(f, "No match in progress"),
            MatchError::MatchInProgress => {
                write!(f, "A match is already in progress; finish or reset it first")
            }
        }
    }
}

impl std::error::Error for MatchError {}

/// Whether a match is being scored.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SessionState {
    /// Entering teams; no active match.
    #[default]
    Setup,
    /// Scoring the live match.
    InProgress,
}

/// Owner of the single live match. Transitions live in `logic::session`.
#[derive(Clone, Debug, Default)]
pub struct MatchSession {
    pub(crate) current: Option<LiveMatch>,
    /// Last id handed out, so ids stay strictly increasing within a process.
    last_id: MatchId,
}

impl MatchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session resumed from a saved draft.
    pub fn with_match(live: LiveMatch) -> Self {
        Self {
            current: Some(live),
            ..Self::default()
        }
    }

    pub fn state(&self) -> SessionState {
        if self.current.is_some() {
            SessionState::InProgress
        } else {
            SessionState::Setup
        }
    }

    pub fn current(&self) -> Option<&LiveMatch> {
        self.current.as_ref()
    }

    pub(crate) fn current_mut(&mut self) -> Result<&mut LiveMatch, MatchError> {
        self.current.as_mut().ok_or(MatchError::NoMatchInProgress)
    }

    /// Next match id: the current millisecond timestamp, bumped past the last
    /// id if two matches finish within the same millisecond.
    pub(crate) fn next_id(&mut self, now: DateTime<Utc>) -> MatchId {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }
}
