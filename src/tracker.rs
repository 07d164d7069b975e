//! The tracker: single owner of the live match, the cached history and the derived stats.
//!
//! `Tracker` does the synchronous work (session transitions, local cache writes,
//! recalculation). `TrackerService` wraps it in one mutex and adds the calls to the
//! authoritative store, never holding the lock across an await.

use crate::logic::{
    adjust_score, discard_match, finish_match, history_entries, order_history, rank_players,
    recompute_stats, start_match, HistoryEntry, LeaderboardEntry,
};
use crate::models::{
    FinishedMatch, LiveMatch, MatchError, MatchId, MatchMetadata, MatchSession,
    PlayerStatsTable, SessionState, TeamSide,
};
use crate::storage::{CacheKey, LocalCache, MatchStore, StoreError, HISTORY_LIMIT};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Where the data behind a snapshot came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Full match set from the authoritative store.
    Remote,
    /// The store was unreachable; built from the local history cache.
    LocalCache,
}

/// Leaderboard and history derived from one consistent match set.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub source: DataSource,
    pub total_matches: usize,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub history: Vec<HistoryEntry>,
}

/// Result of finishing a match. The match is always kept locally; the remote save may fail.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishOutcome {
    #[serde(rename = "match")]
    pub record: FinishedMatch,
    pub saved_remotely: bool,
    pub message: String,
}

pub struct Tracker<C> {
    session: MatchSession,
    cache: C,
    /// Local copy of recent history, newest first, at most `HISTORY_LIMIT`.
    history: Vec<FinishedMatch>,
    stats: PlayerStatsTable,
    /// Finished here but not yet confirmed by the store.
    unsynced: BTreeSet<MatchId>,
}

impl<C: LocalCache> Tracker<C> {
    /// Load whatever the cache holds: a draft match (only if both rosters are
    /// filled in), recent history and the last derived stats.
    pub fn restore(cache: C) -> Self {
        let draft: Option<LiveMatch> = load_or_warn(&cache, CacheKey::CurrentMatch);
        let session = match draft {
            Some(live) if live.has_rosters() => {
                log::info!(
                    "Restored match in progress: {} vs {} ({} - {})",
                    live.team1.label(),
                    live.team2.label(),
                    live.team1.score,
                    live.team2.score
                );
                MatchSession::with_match(live)
            }
            _ => MatchSession::new(),
        };
        let history = load_or_warn(&cache, CacheKey::MatchHistory).unwrap_or_default();
        let stats = load_or_warn(&cache, CacheKey::PlayerStats).unwrap_or_default();
        Self {
            session,
            cache,
            history,
            stats,
            unsynced: BTreeSet::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn current(&self) -> Option<&LiveMatch> {
        self.session.current()
    }

    /// Locally cached history, newest first.
    pub fn local_history(&self) -> &[FinishedMatch] {
        &self.history
    }

    /// Stats from the last recalculation.
    pub fn stats(&self) -> &PlayerStatsTable {
        &self.stats
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn start(
        &mut self,
        team1: [&str; 2],
        team2: [&str; 2],
        metadata: MatchMetadata,
    ) -> Result<LiveMatch, MatchError> {
        let live = start_match(&mut self.session, team1, team2, metadata, Utc::now())?.clone();
        log::info!("Match started: {} vs {}", live.team1.label(), live.team2.label());
        self.save_draft();
        Ok(live)
    }

    pub fn adjust_score(&mut self, side: TeamSide, delta: i64) -> Result<u32, MatchError> {
        let score = adjust_score(&mut self.session, side, delta)?;
        log::debug!("{} score {:+} -> {}", side, delta, score);
        self.save_draft();
        Ok(score)
    }

    /// Close the match, add it to the local history, rebuild the stats from
    /// that history and clear the draft. The match counts as unsynced until
    /// `mark_saved` is called for it.
    pub fn finish(&mut self) -> Result<FinishedMatch, MatchError> {
        let finished = finish_match(&mut self.session, Utc::now())?;
        log::info!("Match {} finished. {}", finished.id, finished.summary());
        self.history.insert(0, finished.clone());
        self.history.truncate(HISTORY_LIMIT);
        self.unsynced.insert(finished.id);
        write_cache(&mut self.cache, CacheKey::MatchHistory, &self.history);
        self.stats = recompute_stats(&self.history);
        write_cache(&mut self.cache, CacheKey::PlayerStats, &self.stats);
        self.clear_draft();
        Ok(finished)
    }

    /// The store has accepted this match.
    pub fn mark_saved(&mut self, id: MatchId) {
        self.unsynced.remove(&id);
    }

    /// Matches finished here whose save the store has not confirmed yet.
    pub fn unsynced(&self) -> &BTreeSet<MatchId> {
        &self.unsynced
    }

    pub fn discard(&mut self) -> Result<(), MatchError> {
        let dropped = discard_match(&mut self.session)?;
        log::info!(
            "Match discarded: {} vs {}",
            dropped.team1.label(),
            dropped.team2.label()
        );
        self.clear_draft();
        Ok(())
    }

    /// Take the full match set from the store: it replaces the local history
    /// (newest `HISTORY_LIMIT` kept) and the stats are rebuilt from all of it.
    /// Unsynced local matches missing from the fetched set are kept alongside it.
    pub fn apply_fetched(&mut self, mut matches: Vec<FinishedMatch>) -> Snapshot {
        let fetched: HashSet<MatchId> = matches.iter().map(|m| m.id).collect();
        self.unsynced.retain(|id| !fetched.contains(id));
        let pending = self
            .history
            .iter()
            .filter(|m| self.unsynced.contains(&m.id))
            .cloned()
            .collect::<Vec<_>>();
        if !pending.is_empty() {
            log::info!("Keeping {} unsynced local match(es) after fetch", pending.len());
        }
        matches.extend(pending);
        order_history(&mut matches);
        self.history = matches.iter().take(HISTORY_LIMIT).cloned().collect();
        let kept: HashSet<MatchId> = self.history.iter().map(|m| m.id).collect();
        self.unsynced.retain(|id| kept.contains(id));
        write_cache(&mut self.cache, CacheKey::MatchHistory, &self.history);
        self.snapshot(DataSource::Remote, &matches)
    }

    /// Rebuild from the local history alone.
    pub fn local_snapshot(&mut self) -> Snapshot {
        let matches = self.history.clone();
        self.snapshot(DataSource::LocalCache, &matches)
    }

    fn snapshot(&mut self, source: DataSource, matches: &[FinishedMatch]) -> Snapshot {
        self.stats = recompute_stats(matches);
        write_cache(&mut self.cache, CacheKey::PlayerStats, &self.stats);
        Snapshot {
            source,
            total_matches: matches.len(),
            leaderboard: rank_players(&self.stats),
            history: history_entries(matches),
        }
    }

    fn save_draft(&mut self) {
        if let Some(live) = self.session.current() {
            write_cache(&mut self.cache, CacheKey::CurrentMatch, live);
        }
    }

    fn clear_draft(&mut self) {
        if let Err(e) = self.cache.remove(CacheKey::CurrentMatch) {
            log::warn!("Could not clear saved match draft: {}", e);
        }
    }
}

fn write_cache<C: LocalCache, T: Serialize>(cache: &mut C, key: CacheKey, value: &T) {
    if let Err(e) = cache.store(key, value) {
        log::warn!("Could not write {} to local cache: {}", key, e);
    }
}

fn load_or_warn<C: LocalCache, T: DeserializeOwned>(cache: &C, key: CacheKey) -> Option<T> {
    match cache.load(key) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Ignoring unreadable {} in local cache: {}", key, e);
            None
        }
    }
}

/// Shared handle used by the HTTP layer.
pub struct TrackerService<C, S> {
    tracker: Mutex<Tracker<C>>,
    store: S,
}

impl<C: LocalCache, S: MatchStore> TrackerService<C, S> {
    pub fn new(tracker: Tracker<C>, store: S) -> Self {
        Self {
            tracker: Mutex::new(tracker),
            store,
        }
    }

    /// Lock the tracker. A poisoned lock is recovered: every mutation leaves the state valid.
    pub fn tracker(&self) -> MutexGuard<'_, Tracker<C>> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn current(&self) -> Option<LiveMatch> {
        self.tracker().current().cloned()
    }

    pub fn start(
        &self,
        team1: [&str; 2],
        team2: [&str; 2],
        metadata: MatchMetadata,
    ) -> Result<LiveMatch, MatchError> {
        self.tracker().start(team1, team2, metadata)
    }

    pub fn adjust_score(&self, side: TeamSide, delta: i64) -> Result<u32, MatchError> {
        self.tracker().adjust_score(side, delta)
    }

    pub fn discard(&self) -> Result<(), MatchError> {
        self.tracker().discard()
    }

    /// Finish the match, then save it to the store. The session is already reset
    /// and the match cached locally before the save starts; a failed save is
    /// reported in the outcome and not rolled back.
    pub async fn finish(&self) -> Result<FinishOutcome, MatchError> {
        let record = self.tracker().finish()?;
        let saved = self.save_remote(&record).await;
        if saved.is_ok() {
            self.tracker().mark_saved(record.id);
        }
        let mut message = record.summary();
        if saved.is_err() {
            message.push_str(" (the result may only be saved locally)");
        }
        Ok(FinishOutcome {
            record,
            saved_remotely: saved.is_ok(),
            message,
        })
    }

    async fn save_remote(&self, record: &FinishedMatch) -> Result<(), StoreError> {
        let result = self.store.save(record).await;
        match &result {
            Ok(()) => log::info!("Match {} saved to store", record.id),
            Err(e) => log::warn!("Saving match {} to store failed: {}", record.id, e),
        }
        result
    }

    /// Re-fetch every match and recompute. Falls back to the local cache when the store fails.
    pub async fn refresh(&self) -> Snapshot {
        match self.store.fetch_all().await {
            Ok(matches) => self.tracker().apply_fetched(matches),
            Err(e) => {
                log::warn!("Fetching matches failed, using local cache: {}", e);
                self.tracker().local_snapshot()
            }
        }
    }
}
