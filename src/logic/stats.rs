//! Player statistics: full recalculation from finished matches, and the leaderboard.

use crate::models::{FinishedMatch, PlayerStats, PlayerStatsTable, TeamSide};
use serde::Serialize;

/// One leaderboard row.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub player: String,
    #[serde(flatten)]
    pub stats: PlayerStats,
    pub win_rate_percent: u32,
}

/// Rebuild every player's stats from scratch.
///
/// Each match counts once for each of its four players: the winning side gets a win,
/// the other side a loss, and a draw counts for all four. The result never depends on
/// earlier results, so calling this twice on the same matches yields the same table.
pub fn recompute_stats(matches: &[FinishedMatch]) -> PlayerStatsTable {
    let mut table = PlayerStatsTable::new();
    for m in matches {
        match m.winner {
            Some(winner) => {
                record(&mut table, m, winner, PlayerStats::add_win);
                record(&mut table, m, winner.opponent(), PlayerStats::add_loss);
            }
            None => {
                record(&mut table, m, TeamSide::Team1, PlayerStats::add_draw);
                record(&mut table, m, TeamSide::Team2, PlayerStats::add_draw);
            }
        }
    }
    table
}

fn record(
    table: &mut PlayerStatsTable,
    m: &FinishedMatch,
    side: TeamSide,
    outcome: fn(&mut PlayerStats),
) {
    for player in &m.team(side).players {
        outcome(table.entry(player.clone()).or_default());
    }
}

/// Order players by win rate, then by raw wins, both descending.
///
/// The sort is stable: players equal on both keys keep the table's (alphabetical) order.
pub fn rank_players(table: &PlayerStatsTable) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<(&String, &PlayerStats)> = table.iter().collect();
    ranked.sort_by(|(_, a), (_, b)| b.cmp_win_rate(a).then_with(|| b.wins.cmp(&a.wins)));
    ranked
        .into_iter()
        .map(|(player, stats)| LeaderboardEntry {
            player: player.clone(),
            stats: *stats,
            win_rate_percent: stats.win_rate_percent(),
        })
        .collect()
}
