mod utils;

use axum::http::StatusCode;
use serde_json::json;
use utils::{send_empty, send_json, test_app};

const ORCHARD: [&str; 3] = ["Sean Nary", "Tyler Pendleton", "Reid Silverman"];
const DREHER: [&str; 3] = ["Jeremy Cortazzo", "Danny Wersching", "AJ Partridge"];

async fn create_players(app: &axum::Router, names: &[&str]) -> Vec<i64> {
    let mut ids = Vec::new();
    for name in names {
        let (status, body) = send_json(app, "POST", "/players", json!({ "name": name })).await;
        assert_eq!(status, StatusCode::OK);
        ids.push(body["id"].as_i64().unwrap());
    }
    ids
}

fn game_body(ids: &[i64], t1: i32, t2: i32, played_at: &str) -> serde_json::Value {
    json!({
        "team1_score": t1,
        "team2_score": t2,
        "team1_players": ids[..3].to_vec(),
        "team2_players": ids[3..6].to_vec(),
        "location": "The Backyard",
        "played_at": played_at,
    })
}

fn holes_body(team1: usize, team2: usize) -> serde_json::Value {
    let holes: Vec<serde_json::Value> = (1..=18)
        .map(|n| {
            let winner = if n <= team1 {
                json!(1)
            } else if n <= team1 + team2 {
                json!(2)
            } else {
                json!(null)
            };
            json!({ "hole_number": n, "winner_team": winner })
        })
        .collect();
    json!(holes)
}

#[tokio::test]
async fn die_workflow_from_players_to_teams_and_rivalry() {
    let app = test_app();
    let names: Vec<&str> = ORCHARD.iter().chain(DREHER.iter()).copied().collect();
    let ids = create_players(&app, &names).await;

    for (t1, t2, when) in [
        (21, 15, "2025-03-01T18:00:00Z"),
        (21, 18, "2025-05-10T18:00:00Z"),
        (17, 21, "2024-09-20T18:00:00Z"),
    ] {
        let (status, body) = send_json(&app, "POST", "/games", game_body(&ids, t1, t2, when)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["team1_players"].as_array().unwrap().len(), 3);
    }

    // Cached player aggregates reflect all three games
    let (status, player) = send_empty(&app, "GET", &format!("/players/{}", ids[0])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(player["games_played"], 3);
    assert_eq!(player["games_won"], 2);
    assert_eq!(player["total_points_scored"], 59);
    assert_eq!(player["total_points_against"], 54);

    // Season-scoped stats are computed on the fly
    let (status, stats) =
        send_empty(&app, "GET", &format!("/players/{}/stats?season=2025", ids[0])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["games_played"], 2);
    assert_eq!(stats["games_won"], 2);
    assert_eq!(stats["win_percentage"], 100.0);
    assert_eq!(stats["recent_games"].as_array().unwrap().len(), 2);

    // Leaderboard ranks the winning side first; an idle season is empty
    let (status, leaderboard) = send_empty(&app, "GET", "/players/leaderboard").await;
    assert_eq!(status, StatusCode::OK);
    let entries = leaderboard.as_array().unwrap();
    assert_eq!(entries.len(), 6);
    let top = entries[0]["win_percentage"].as_f64().unwrap();
    assert!(top > 66.0 && top < 67.0);
    let (_, empty_season) = send_empty(&app, "GET", "/players/leaderboard?season=1999").await;
    assert!(empty_season.as_array().unwrap().is_empty());

    // Both triples reached the 3-game bar and exist as teams
    let (status, listing) = send_empty(&app, "GET", "/teams").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["total_games"], 3);
    assert_eq!(listing["min_games_required"], 3);
    let teams = listing["teams"].as_array().unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[0]["team_name"], "Silverman/Nary/Pendleton");

    let team_id = teams[0]["id"].as_i64().unwrap();
    let (status, detail) = send_empty(&app, "GET", &format!("/teams/{}", team_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["players"].as_array().unwrap().len(), 3);
    assert_eq!(detail["recent_games"].as_array().unwrap().len(), 3);

    // The rosters match the configured rivalry exactly
    let (status, rivalry) = send_empty(&app, "GET", "/rivalry").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rivalry["total_games"], 3);
    assert_eq!(rivalry["roster_a"]["name"], "The Orchard");
    assert_eq!(rivalry["roster_a"]["wins"], 2);
    assert_eq!(rivalry["roster_b"]["wins"], 1);
    assert_eq!(rivalry["point_differential"], 5);
    assert_eq!(rivalry["recent_games"].as_array().unwrap().len(), 3);

    // Deleting one game drops both teams back under the threshold
    let (status, _) = send_empty(&app, "DELETE", "/games/1").await;
    assert_eq!(status, StatusCode::OK);

    let (_, listing) = send_empty(&app, "GET", "/teams").await;
    assert!(listing["teams"].as_array().unwrap().is_empty());
    let (_, player) = send_empty(&app, "GET", &format!("/players/{}", ids[0])).await;
    assert_eq!(player["games_played"], 2);
    let (_, rivalry) = send_empty(&app, "GET", "/rivalry").await;
    assert_eq!(rivalry["total_games"], 2);
}

#[tokio::test]
async fn golf_workflow_records_updates_and_deletes_rounds() {
    let app = test_app();
    let ids = create_players(&app, &["Ana Reyes", "Ben Ochoa", "Cal Irwin", "Dov Marsh"]).await;

    let body = json!({
        "course": "Rosewood Links",
        "played_at": "2025-07-04T09:00:00Z",
        "team1_players": ids[..2].to_vec(),
        "team2_players": ids[2..4].to_vec(),
        "holes": holes_body(10, 6),
    });
    let (status, round) = send_json(&app, "POST", "/golf/rounds", body).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(round["team1_holes_won"], 10);
    assert_eq!(round["team2_holes_won"], 6);
    assert_eq!(round["halved_holes"], 2);
    assert_eq!(round["winner_team"], 1);
    let round_id = round["id"].as_i64().unwrap();

    let (status, leaderboard) = send_empty(&app, "GET", "/golf/stats").await;
    assert_eq!(status, StatusCode::OK);
    let entries = leaderboard.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["win_percentage"], 100.0);
    assert_eq!(entries[3]["win_percentage"], 0.0);

    let (status, detail) = send_empty(&app, "GET", &format!("/golf/stats/{}", ids[0])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["rounds_played"], 1);
    assert_eq!(detail["rounds_won"], 1);
    assert_eq!(detail["holes_won"], 10);
    assert_eq!(detail["holes_lost"], 6);
    assert_eq!(detail["recent_rounds"].as_array().unwrap().len(), 1);

    // Rewriting the hole results flips the winner and every cached stat
    let (status, updated) = send_json(
        &app,
        "PUT",
        &format!("/golf/rounds/{}", round_id),
        json!({ "holes": holes_body(5, 11) }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["winner_team"], 2);

    let (_, detail) = send_empty(&app, "GET", &format!("/golf/stats/{}", ids[0])).await;
    assert_eq!(detail["rounds_won"], 0);
    assert_eq!(detail["rounds_lost"], 1);

    let (status, _) = send_empty(&app, "DELETE", &format!("/golf/rounds/{}", round_id)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, rounds) = send_empty(&app, "GET", "/golf/rounds").await;
    assert!(rounds.as_array().unwrap().is_empty());
    let (_, leaderboard) = send_empty(&app, "GET", "/golf/stats").await;
    assert!(leaderboard.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn validation_failures_leave_no_partial_state() {
    let app = test_app();
    let names: Vec<&str> = ORCHARD.iter().chain(DREHER.iter()).copied().collect();
    let ids = create_players(&app, &names).await;

    // Tied scores
    let (status, _) = send_json(
        &app,
        "POST",
        "/games",
        game_body(&ids, 21, 21, "2025-03-01T18:00:00Z"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Short roster
    let (status, _) = send_json(
        &app,
        "POST",
        "/games",
        json!({
            "team1_score": 21,
            "team2_score": 15,
            "team1_players": ids[..2].to_vec(),
            "team2_players": ids[3..6].to_vec(),
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 17-hole golf round
    let mut holes = holes_body(9, 8);
    holes.as_array_mut().unwrap().pop();
    let (status, _) = send_json(
        &app,
        "POST",
        "/golf/rounds",
        json!({
            "course": "Rosewood Links",
            "team1_players": ids[..2].to_vec(),
            "team2_players": ids[2..4].to_vec(),
            "holes": holes,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, games) = send_empty(&app, "GET", "/games").await;
    assert!(games.as_array().unwrap().is_empty());
    let (_, rounds) = send_empty(&app, "GET", "/golf/rounds").await;
    assert!(rounds.as_array().unwrap().is_empty());
    let (_, player) = send_empty(&app, "GET", &format!("/players/{}", ids[0])).await;
    assert_eq!(player["games_played"], 0);
}

#[tokio::test]
async fn course_endpoints_surface_upstream_failures() {
    let app = test_app();

    // The offline lookup knows no courses: search is empty, fetch is 502
    let (status, hits) = send_empty(&app, "GET", "/golf/courses/search?query=rosewood").await;
    assert_eq!(status, StatusCode::OK);
    assert!(hits.as_array().unwrap().is_empty());

    let (status, body) = send_empty(&app, "GET", "/golf/courses/42").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("unavailable"));
}
