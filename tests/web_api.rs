//! HTTP API tests: full request/response cycle against file-backed storage.

use actix_web::{http::StatusCode, test, web::Data, App};
use padel_tracker_web::api::{self, AppService};
use padel_tracker_web::{FileCache, JsonFileStore, Tracker};
use serde_json::{json, Value};
use tempfile::TempDir;

fn app_state(tmp: &TempDir) -> Data<AppService> {
    let cache = FileCache::open(tmp.path().join("cache")).unwrap();
    let store = JsonFileStore::new(tmp.path().join("matches.json"));
    Data::new(AppService::new(Tracker::restore(cache), store))
}

#[actix_web::test]
async fn full_match_flow() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(app_state(&tmp))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/match").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({
            "team1": ["Al", "Bo"],
            "team2": ["Cy", "Di"],
            "location": "Court 1",
            "time": "2025-08-01T18:30"
        }))
        .to_request();
    let live: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(live["team1"]["score"], 0);
    assert_eq!(live["metadata"]["location"], "Court 1");

    for (side, delta) in [("team1", 1), ("team1", 1), ("team1", 1), ("team2", 1)] {
        let req = test::TestRequest::post()
            .uri("/api/match/score")
            .set_json(json!({ "side": side, "delta": delta }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::post()
        .uri("/api/match/finish")
        .to_request();
    let outcome: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome["savedRemotely"], true);
    assert_eq!(outcome["match"]["winner"], "team1");
    assert_eq!(outcome["match"]["team1"]["score"], 3);
    assert_eq!(outcome["match"]["team2"]["score"], 1);

    let req = test::TestRequest::get()
        .uri("/api/leaderboard")
        .to_request();
    let board: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(board["source"], "remote");
    let rows = board["leaderboard"].as_array().unwrap();
    assert_eq!(rows.len(), 4);
    let al = rows.iter().find(|r| r["player"] == "Al").unwrap();
    assert_eq!(al["wins"], 1);
    assert_eq!(al["totalMatches"], 1);
    let cy = rows.iter().find(|r| r["player"] == "Cy").unwrap();
    assert_eq!(cy["losses"], 1);

    let req = test::TestRequest::get().uri("/api/history").to_request();
    let history: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(history["history"].as_array().unwrap().len(), 1);
    assert_eq!(history["history"][0]["date"], "2025-08-01T18:30:00Z");

    let req = test::TestRequest::get()
        .uri("/api/history.csv")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let csv = String::from_utf8(body.to_vec()).unwrap();
    assert!(csv.contains("Al & Bo,Cy & Di,3,1,team1,Court 1"));
}

#[actix_web::test]
async fn validation_errors_are_bad_requests() {
    let tmp = tempfile::tempdir().unwrap();
    let app = test::init_service(
        App::new()
            .app_data(app_state(&tmp))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({ "team1": ["Al", " "], "team2": ["Cy", "Di"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("player names"));

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({ "team1": ["Al", "Bo"], "team2": ["Cy", "Di"], "time": "tomorrow" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/api/match")
        .set_json(json!({ "team1": ["Al", "Bo"], "team2": ["Cy", "Di"] }))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::post()
        .uri("/api/match/finish")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete().uri("/api/match").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::post()
        .uri("/api/match/score")
        .set_json(json!({ "side": "team1", "delta": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
