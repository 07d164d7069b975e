//! Data structures for the score tracker: teams, live and finished matches, player stats.

mod finished_match;
mod live_match;
mod player;
mod session;
mod team;

pub use finished_match::{FinishedMatch, MatchId};
pub use live_match::{parse_match_time, LiveMatch, MatchMetadata};
pub use player::{PlayerStats, PlayerStatsTable};
pub use session::{MatchError, MatchSession, SessionState};
pub use team::{Team, TeamSide};
