//! LiveMatch (the match being scored right now) and its MatchMetadata.

use crate::models::team::{Team, TeamSide};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Free-form details entered at setup. Empty strings are stored as `None`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchMetadata {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub location: Option<String>,
    /// When the match was scheduled to be played (chosen by the user), not when scoring started.
    #[serde(default, deserialize_with = "flexible_time")]
    pub time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub notes: Option<String>,
}

impl MatchMetadata {
    pub fn new(
        location: Option<String>,
        time: Option<DateTime<Utc>>,
        notes: Option<String>,
    ) -> Self {
        Self {
            location: non_blank(location),
            time,
            notes: non_blank(notes),
        }
    }
}

/// The in-progress match: two teams, metadata and the moment scoring began.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatch {
    pub team1: Team,
    pub team2: Team,
    #[serde(default)]
    pub metadata: MatchMetadata,
    /// Optional because records written by older clients may lack it.
    #[serde(default)]
    pub start_time: Option<DateTime<Utc>>,
}

impl LiveMatch {
    /// New match with both scores at zero.
    pub fn new(
        team1: [String; 2],
        team2: [String; 2],
        metadata: MatchMetadata,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            team1: Team::new(team1),
            team2: Team::new(team2),
            metadata,
            start_time: Some(started_at),
        }
    }

    pub fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Team1 => &mut self.team1,
            TeamSide::Team2 => &mut self.team2,
        }
    }

    /// Both rosters are filled in (used when restoring a saved draft).
    pub fn has_rosters(&self) -> bool {
        self.team1.has_roster() && self.team2.has_roster()
    }

    /// At least one team has scored.
    pub fn has_score(&self) -> bool {
        self.team1.score > 0 || self.team2.score > 0
    }

    /// Side with the strictly greater score, `None` on a tie.
    pub fn leader(&self) -> Option<TeamSide> {
        use std::cmp::Ordering::*;
        match self.team1.score.cmp(&self.team2.score) {
            Greater => Some(TeamSide::Team1),
            Less => Some(TeamSide::Team2),
            Equal => None,
        }
    }
}

/// Parse a user-entered match time: RFC 3339, or the browser `datetime-local`
/// shape `YYYY-MM-DDTHH:MM[:SS]` taken as UTC.
pub fn parse_match_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(non_blank(raw))
}

fn flexible_time<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_match_time(&s)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid match time: {s}"))),
    }
}
