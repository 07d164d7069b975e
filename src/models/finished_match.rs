//! FinishedMatch: the immutable record of a completed game.

use crate::models::live_match::{LiveMatch, MatchMetadata};
use crate::models::team::{Team, TeamSide};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a finished match: creation time in milliseconds since the epoch.
pub type MatchId = i64;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishedMatch {
    pub id: MatchId,
    pub team1: Team,
    pub team2: Team,
    #[serde(default)]
    pub metadata: MatchMetadata,
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: DateTime<Utc>,
    /// `None` means a draw.
    pub winner: Option<TeamSide>,
}

impl FinishedMatch {
    /// Freeze a live match. The winner is the side with the strictly greater score.
    pub fn from_live(live: LiveMatch, id: MatchId, ended_at: DateTime<Utc>) -> Self {
        let winner = live.leader();
        Self {
            id,
            team1: live.team1,
            team2: live.team2,
            metadata: live.metadata,
            start_time: live.start_time,
            end_time: ended_at,
            winner,
        }
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Team1 => &self.team1,
            TeamSide::Team2 => &self.team2,
        }
    }

    /// One-line result, e.g. "Al & Bo win! Final score: 3 - 1".
    pub fn summary(&self) -> String {
        let score = format!("Final score: {} - {}", self.team1.score, self.team2.score);
        match self.winner {
            Some(side) => format!("{} win! {}", self.team(side).label(), score),
            None => format!("It's a draw! {}", score),
        }
    }

    /// Date used for ordering history: scheduled time, else start, else end.
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.metadata
            .time
            .or(self.start_time)
            .unwrap_or(self.end_time)
    }
}
