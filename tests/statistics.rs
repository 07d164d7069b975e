//! Integration tests for stats recalculation, leaderboard ranking and history ordering.

use chrono::{DateTime, Duration, TimeZone, Utc};
use padel_tracker_web::{
    history_csv, history_entries, order_history, rank_players, recompute_stats, FinishedMatch,
    MatchMetadata, PlayerStats, PlayerStatsTable, Team, TeamSide,
};

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 10, 12, 0, 0).unwrap()
}

fn played(id: i64, team1: [&str; 2], team2: [&str; 2], scores: (u32, u32)) -> FinishedMatch {
    let mut t1 = Team::new(team1.map(String::from));
    let mut t2 = Team::new(team2.map(String::from));
    t1.score = scores.0;
    t2.score = scores.1;
    let winner = match scores.0.cmp(&scores.1) {
        std::cmp::Ordering::Greater => Some(TeamSide::Team1),
        std::cmp::Ordering::Less => Some(TeamSide::Team2),
        std::cmp::Ordering::Equal => None,
    };
    FinishedMatch {
        id,
        team1: t1,
        team2: t2,
        metadata: MatchMetadata::default(),
        start_time: Some(base_time() + Duration::hours(id)),
        end_time: base_time() + Duration::hours(id) + Duration::minutes(50),
        winner,
    }
}

fn stats(wins: u32, losses: u32, draws: u32) -> PlayerStats {
    PlayerStats {
        wins,
        losses,
        draws,
        total_matches: wins + losses + draws,
    }
}

#[test]
fn empty_match_list_gives_empty_table() {
    assert!(recompute_stats(&[]).is_empty());
    assert!(rank_players(&PlayerStatsTable::new()).is_empty());
}

#[test]
fn three_one_scenario_counts_wins_and_losses() {
    let table = recompute_stats(&[played(1, ["Al", "Bo"], ["Cy", "Di"], (3, 1))]);
    assert_eq!(table["Al"], stats(1, 0, 0));
    assert_eq!(table["Bo"], stats(1, 0, 0));
    assert_eq!(table["Cy"], stats(0, 1, 0));
    assert_eq!(table["Di"], stats(0, 1, 0));
}

#[test]
fn draw_counts_for_all_four_players() {
    let table = recompute_stats(&[played(1, ["Al", "Bo"], ["Cy", "Di"], (2, 2))]);
    assert_eq!(table.len(), 4);
    for stats in table.values() {
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.losses, 0);
        assert_eq!(stats.total_matches, 1);
    }
}

#[test]
fn totals_always_add_up_with_repeated_players() {
    let matches = vec![
        played(1, ["Al", "Bo"], ["Cy", "Di"], (6, 4)),
        played(2, ["Al", "Cy"], ["Bo", "Di"], (3, 6)),
        played(3, ["Di", "Al"], ["Bo", "Ed"], (5, 5)),
        played(4, ["Ed", "Ed"], ["Al", "Bo"], (1, 0)),
    ];
    let table = recompute_stats(&matches);
    for (player, s) in &table {
        assert!(s.is_consistent(), "{player}: {s:?}");
    }
    assert_eq!(table["Al"], stats(1, 2, 1));
    // A name listed twice in one team counts twice.
    assert_eq!(table["Ed"], stats(2, 0, 1));
}

#[test]
fn names_are_case_sensitive() {
    let table = recompute_stats(&[played(1, ["al", "Bo"], ["Al", "Di"], (1, 0))]);
    assert_eq!(table["al"].wins, 1);
    assert_eq!(table["Al"].losses, 1);
}

#[test]
fn recompute_is_idempotent() {
    let matches = vec![
        played(1, ["Al", "Bo"], ["Cy", "Di"], (6, 4)),
        played(2, ["Cy", "Bo"], ["Al", "Di"], (2, 2)),
    ];
    let first = recompute_stats(&matches);
    let second = recompute_stats(&matches);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn leaderboard_orders_by_win_rate_then_wins() {
    let mut table = PlayerStatsTable::new();
    table.insert("B".into(), stats(2, 2, 0));
    table.insert("C".into(), stats(3, 1, 0));
    table.insert("A".into(), stats(3, 0, 0));

    let ranked = rank_players(&table);
    let order: Vec<&str> = ranked.iter().map(|e| e.player.as_str()).collect();
    assert_eq!(order, ["A", "C", "B"]);
    let percents: Vec<u32> = ranked.iter().map(|e| e.win_rate_percent).collect();
    assert_eq!(percents, [100, 75, 50]);
}

#[test]
fn equal_win_rate_breaks_on_wins_then_stays_stable() {
    let mut table = PlayerStatsTable::new();
    table.insert("Zed".into(), stats(1, 1, 0));
    table.insert("Amy".into(), stats(2, 2, 0));
    table.insert("Bea".into(), stats(1, 1, 0));
    table.insert("Nil".into(), PlayerStats::default());
    table.insert("Dee".into(), stats(0, 0, 2));

    let order: Vec<String> = rank_players(&table).into_iter().map(|e| e.player).collect();
    // Amy (50%, 2 wins), then Bea and Zed (50%, 1 win) in name order, then the 0% players.
    assert_eq!(order, ["Amy", "Bea", "Zed", "Dee", "Nil"]);
}

#[test]
fn history_is_most_recent_first() {
    let d1 = played(1, ["A", "B"], ["C", "D"], (1, 0));
    let d2 = played(2, ["A", "B"], ["C", "D"], (0, 1));
    let d3 = played(3, ["A", "B"], ["C", "D"], (2, 1));
    let mut list = vec![d2.clone(), d1.clone(), d3.clone()];
    order_history(&mut list);
    let ids: Vec<i64> = list.iter().map(|m| m.id).collect();
    assert_eq!(ids, [3, 2, 1]);
}

#[test]
fn effective_date_prefers_scheduled_time_then_start_then_end() {
    let mut scheduled = played(1, ["A", "B"], ["C", "D"], (1, 0));
    scheduled.metadata.time = Some(base_time() + Duration::days(30));
    let started = played(2, ["A", "B"], ["C", "D"], (1, 0));
    let mut ended_only = played(3, ["A", "B"], ["C", "D"], (1, 0));
    ended_only.start_time = None;
    ended_only.end_time = base_time() - Duration::days(1);

    assert_eq!(scheduled.effective_date(), base_time() + Duration::days(30));
    assert_eq!(started.effective_date(), started.start_time.unwrap());
    assert_eq!(ended_only.effective_date(), ended_only.end_time);

    let entries = history_entries(&[ended_only, started, scheduled]);
    let ids: Vec<i64> = entries.iter().map(|e| e.record.id).collect();
    assert_eq!(ids, [1, 2, 3]);
    assert_eq!(entries[0].date, base_time() + Duration::days(30));
}

#[test]
fn csv_export_lists_matches_in_history_order() {
    let mut first = played(1, ["Al", "Bo"], ["Cy", "Di"], (6, 3));
    first.metadata.location = Some("Club, court 2".into());
    let second = played(2, ["Al", "Cy"], ["Bo", "Di"], (4, 4));

    let csv = history_csv(&history_entries(&[first, second])).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("id,date,team1,team2"));
    assert!(lines[1].starts_with("2,"));
    assert!(lines[1].contains("Al & Cy,Bo & Di,4,4,draw"));
    assert!(lines[2].contains("Al & Bo,Cy & Di,6,3,team1,\"Club, court 2\""));
}
