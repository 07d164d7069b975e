//! TeamSide and Team for a 2v2 match.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two positional slots of a match. Not an identity: the same
/// players can be `team1` in one match and `team2` in the next.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    /// The other side.
    pub fn opponent(self) -> Self {
        match self {
            TeamSide::Team1 => TeamSide::Team2,
            TeamSide::Team2 => TeamSide::Team1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeamSide::Team1 => "team1",
            TeamSide::Team2 => "team2",
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A team within a match: exactly two players and the running score.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub players: [String; 2],
    #[serde(default)]
    pub score: u32,
}

impl Team {
    /// New team with a score of zero.
    pub fn new(players: [String; 2]) -> Self {
        Self { players, score: 0 }
    }

    /// Apply a signed delta to the score, flooring at zero. Returns the new score.
    pub fn adjust_score(&mut self, delta: i64) -> u32 {
        let next = i64::from(self.score)
            .saturating_add(delta)
            .clamp(0, i64::from(u32::MAX));
        self.score = next as u32;
        self.score
    }

    /// True when both slots hold a non-blank name.
    pub fn has_roster(&self) -> bool {
        self.players.iter().all(|p| !p.trim().is_empty())
    }

    /// Display name, e.g. "Al & Bo".
    pub fn label(&self) -> String {
        self.players.join(" & ")
    }
}
