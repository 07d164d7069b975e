//! PlayerStats and the per-player stats table.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Win/loss/draw tally of one player. `wins + losses + draws == total_matches`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub wins: u32,
    pub losses: u32,
    #[serde(default)]
    pub draws: u32,
    pub total_matches: u32,
}

impl PlayerStats {
    /// Record a win for this player.
    pub fn add_win(&mut self) {
        self.wins += 1;
        self.total_matches += 1;
    }

    /// Record a loss for this player.
    pub fn add_loss(&mut self) {
        self.losses += 1;
        self.total_matches += 1;
    }

    /// Record a draw for this player.
    pub fn add_draw(&mut self) {
        self.draws += 1;
        self.total_matches += 1;
    }

    /// Share of matches won, 0.0 with no matches played.
    pub fn win_rate(&self) -> f64 {
        if self.total_matches == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.total_matches)
        }
    }

    /// Win rate rounded to a whole percent.
    pub fn win_rate_percent(&self) -> u32 {
        (self.win_rate() * 100.0).round() as u32
    }

    /// Compare win rates exactly (cross-multiplied), treating no matches as 0%.
    pub fn cmp_win_rate(&self, other: &Self) -> Ordering {
        let lhs = u64::from(self.wins) * u64::from(other.total_matches.max(1));
        let rhs = u64::from(other.wins) * u64::from(self.total_matches.max(1));
        lhs.cmp(&rhs)
    }

    pub fn is_consistent(&self) -> bool {
        self.wins + self.losses + self.draws == self.total_matches
    }
}

/// Stats keyed by exact player name. Ordered so two recomputations serialize identically.
pub type PlayerStatsTable = BTreeMap<String, PlayerStats>;
