//! REST API over the tracker service.

use crate::logic::{history_csv, HistoryEntry, LeaderboardEntry};
use crate::models::{parse_match_time, MatchError, MatchMetadata, TeamSide};
use crate::storage::{FileCache, JsonFileStore};
use crate::tracker::{DataSource, TrackerService};
use actix_web::{
    delete, get, post,
    web::{self, Data, Json},
    HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};

/// The service as wired by the web binary: file-backed cache and store.
pub type AppService = TrackerService<FileCache, JsonFileStore>;

type AppState = Data<AppService>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct StartMatchBody {
    team1: [String; 2],
    team2: [String; 2],
    #[serde(default)]
    location: Option<String>,
    /// RFC 3339 or `YYYY-MM-DDTHH:MM`.
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

#[derive(Deserialize)]
struct AdjustScoreBody {
    side: TeamSide,
    delta: i64,
}

#[derive(Serialize)]
struct LeaderboardResponse {
    source: DataSource,
    leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Serialize)]
struct HistoryResponse {
    source: DataSource,
    history: Vec<HistoryEntry>,
}

fn error_body(message: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn match_error(e: MatchError) -> HttpResponse {
    match e {
        MatchError::NoMatchInProgress => HttpResponse::NotFound().json(error_body(e)),
        _ => HttpResponse::BadRequest().json(error_body(e)),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tracker-web",
    })
}

/// The match being scored (404 if none).
#[get("/api/match")]
async fn api_get_match(state: AppState) -> HttpResponse {
    match state.current() {
        Some(live) => HttpResponse::Ok().json(live),
        None => match_error(MatchError::NoMatchInProgress),
    }
}

/// Start a match (Setup -> InProgress).
#[post("/api/match")]
async fn api_start_match(state: AppState, body: Json<StartMatchBody>) -> HttpResponse {
    let body = body.into_inner();
    let time = match body.time.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        Some(raw) => match parse_match_time(raw) {
            Some(t) => Some(t),
            None => {
                return HttpResponse::BadRequest()
                    .json(error_body(format!("Invalid match time: {raw}")))
            }
        },
        None => None,
    };
    let metadata = MatchMetadata::new(body.location, time, body.notes);
    let team1 = [body.team1[0].as_str(), body.team1[1].as_str()];
    let team2 = [body.team2[0].as_str(), body.team2[1].as_str()];
    match state.start(team1, team2, metadata) {
        Ok(live) => HttpResponse::Ok().json(live),
        Err(e) => match_error(e),
    }
}

/// Add or remove points for one side.
#[post("/api/match/score")]
async fn api_adjust_score(state: AppState, body: Json<AdjustScoreBody>) -> HttpResponse {
    match state.adjust_score(body.side, body.delta) {
        Ok(score) => HttpResponse::Ok().json(serde_json::json!({
            "side": body.side,
            "score": score,
            "match": state.current(),
        })),
        Err(e) => match_error(e),
    }
}

/// Finish the match; reports whether the store accepted it.
#[post("/api/match/finish")]
async fn api_finish_match(state: AppState) -> HttpResponse {
    match state.finish().await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => match_error(e),
    }
}

/// Discard the match without recording it.
#[delete("/api/match")]
async fn api_discard_match(state: AppState) -> HttpResponse {
    match state.discard() {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => match_error(e),
    }
}

/// Re-fetch all matches and recompute leaderboard and history.
#[post("/api/refresh")]
async fn api_refresh(state: AppState) -> HttpResponse {
    HttpResponse::Ok().json(state.refresh().await)
}

#[get("/api/leaderboard")]
async fn api_leaderboard(state: AppState) -> HttpResponse {
    let snapshot = state.refresh().await;
    HttpResponse::Ok().json(LeaderboardResponse {
        source: snapshot.source,
        leaderboard: snapshot.leaderboard,
    })
}

#[get("/api/history")]
async fn api_history(state: AppState) -> HttpResponse {
    let snapshot = state.refresh().await;
    HttpResponse::Ok().json(HistoryResponse {
        source: snapshot.source,
        history: snapshot.history,
    })
}

#[get("/api/history.csv")]
async fn api_history_csv(state: AppState) -> HttpResponse {
    let snapshot = state.refresh().await;
    match history_csv(&snapshot.history) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header(("Content-Disposition", "attachment; filename=\"matches.csv\""))
            .body(body),
        Err(e) => {
            log::error!("CSV export failed: {}", e);
            HttpResponse::InternalServerError().json(error_body("CSV export failed"))
        }
    }
}

/// Register every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_get_match)
        .service(api_start_match)
        .service(api_adjust_score)
        .service(api_finish_match)
        .service(api_discard_match)
        .service(api_refresh)
        .service(api_leaderboard)
        .service(api_history)
        .service(api_history_csv);
}
