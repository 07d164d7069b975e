//! Padel score tracker: library with models, match/statistics logic, persistence and the web API.

pub mod api;
pub mod config;
pub mod logic;
pub mod models;
pub mod storage;
pub mod tracker;

pub use logic::{
    adjust_score, discard_match, finish_match, history_csv, history_entries, order_history,
    rank_players, recompute_stats, start_match, HistoryEntry, LeaderboardEntry,
};
pub use models::{
    parse_match_time, FinishedMatch, LiveMatch, MatchError, MatchId, MatchMetadata, MatchSession,
    PlayerStats, PlayerStatsTable, SessionState, Team, TeamSide,
};
pub use storage::{
    CacheKey, FileCache, JsonFileStore, LocalCache, MatchStore, MemoryCache, MemoryStore,
    StoreError, HISTORY_LIMIT,
};
pub use tracker::{DataSource, FinishOutcome, Snapshot, Tracker, TrackerService};
