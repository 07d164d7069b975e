//! Score tracker business logic: match lifecycle, statistics and history.

mod history;
mod session;
mod stats;

pub use history::{history_csv, history_entries, order_history, HistoryEntry};
pub use session::{adjust_score, discard_match, finish_match, start_match};
pub use stats::{rank_players, recompute_stats, LeaderboardEntry};
