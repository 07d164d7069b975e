//! Match history ordering and CSV export.

use crate::models::FinishedMatch;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A finished match as shown in the history list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub record: FinishedMatch,
    pub date: DateTime<Utc>,
}

/// Most recent first by effective date. Stable for equal dates.
pub fn order_history(matches: &mut [FinishedMatch]) {
    matches.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));
}

/// Ordered copy of `matches` with the date each one is listed under.
pub fn history_entries(matches: &[FinishedMatch]) -> Vec<HistoryEntry> {
    let mut ordered = matches.to_vec();
    order_history(&mut ordered);
    ordered
        .into_iter()
        .map(|record| HistoryEntry {
            date: record.effective_date(),
            record,
        })
        .collect()
}

/// Render history as CSV, one row per match in the given order.
pub fn history_csv(entries: &[HistoryEntry]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id", "date", "team1", "team2", "team1_score", "team2_score", "winner", "location",
        "notes",
    ])?;
    for entry in entries {
        let m = &entry.record;
        writer.write_record([
            m.id.to_string(),
            entry.date.to_rfc3339(),
            m.team1.label(),
            m.team2.label(),
            m.team1.score.to_string(),
            m.team2.score.to_string(),
            m.winner.map_or("draw", |w| w.as_str()).to_string(),
            m.metadata.location.clone().unwrap_or_default(),
            m.metadata.notes.clone().unwrap_or_default(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
