//! Match lifecycle: Setup -> InProgress (start), score changes, and back to Setup (finish / discard).

use crate::models::{
    FinishedMatch, LiveMatch, MatchError, MatchMetadata, MatchSession, SessionState, TeamSide,
};
use chrono::{DateTime, Utc};

/// Start a match. All four names must be non-empty after trimming; names are stored trimmed.
pub fn start_match<'s>(
    session: &'s mut MatchSession,
    team1: [&str; 2],
    team2: [&str; 2],
    metadata: MatchMetadata,
    now: DateTime<Utc>,
) -> Result<&'s LiveMatch, MatchError> {
    if session.state() != SessionState::Setup {
        return Err(MatchError::MatchInProgress);
    }
    let team1 = roster(TeamSide::Team1, team1)?;
    let team2 = roster(TeamSide::Team2, team2)?;
    Ok(&*session
        .current
        .insert(LiveMatch::new(team1, team2, metadata, now)))
}

/// Add `delta` (may be negative) to one side's score, floored at zero. Returns the new score.
pub fn adjust_score(
    session: &mut MatchSession,
    side: TeamSide,
    delta: i64,
) -> Result<u32, MatchError> {
    let live = session.current_mut()?;
    Ok(live.team_mut(side).adjust_score(delta))
}

/// Close the live match and return its record. At least one side must have scored;
/// equal scores are a draw. The session is back in Setup afterwards.
pub fn finish_match(
    session: &mut MatchSession,
    now: DateTime<Utc>,
) -> Result<FinishedMatch, MatchError> {
    if !session.current_mut()?.has_score() {
        return Err(MatchError::NoScoresRecorded);
    }
    let id = session.next_id(now);
    let live = session
        .current
        .take()
        .ok_or(MatchError::NoMatchInProgress)?;
    Ok(FinishedMatch::from_live(live, id, now))
}

/// Drop the live match without producing a record.
pub fn discard_match(session: &mut MatchSession) -> Result<LiveMatch, MatchError> {
    session.current.take().ok_or(MatchError::NoMatchInProgress)
}

fn roster(side: TeamSide, names: [&str; 2]) -> Result<[String; 2], MatchError> {
    for (slot, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(MatchError::EmptyPlayerName { side, slot });
        }
    }
    Ok(names.map(|n| n.trim().to_string()))
}
