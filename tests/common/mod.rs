// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use matchlog::config::Config;
use matchlog::db::Database;
use matchlog::middleware::auth::create_session_token;
use matchlog::models::Log;
use matchlog::routes::create_router;
use matchlog::AppState;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Create a test app backed by an in-memory database and an in-process
/// stand-in for TheSportsDB. Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let sportsdb_base_url = spawn_mock_sportsdb().await;
    let config = Config {
        sportsdb_base_url,
        ..Config::default()
    };

    let db = Database::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");

    let state = Arc::new(AppState::new(config, db));
    (create_router(state.clone()), state)
}

/// Provision a user row and set a display name.
#[allow(dead_code)]
pub async fn create_test_user(state: &AppState, display_name: &str) -> Uuid {
    let user_id = Uuid::new_v4();
    let email = format!("{}@example.com", display_name.to_lowercase().replace(' ', "."));
    state
        .db
        .provision_user(user_id, Some(&email))
        .await
        .expect("Failed to provision user");
    state
        .db
        .update_profile(user_id, Some(display_name), None, None, None, None, None)
        .await
        .expect("Failed to set display name");
    user_id
}

/// Mint a session token the way the identity provider would.
#[allow(dead_code)]
pub fn create_test_token(state: &AppState, user_id: Uuid) -> String {
    create_session_token(user_id, Some("test@example.com"), &state.config.session_signing_key)
        .expect("Failed to create session token")
}

/// Insert a log row directly, with a controlled creation time.
#[allow(dead_code)]
pub async fn seed_log(
    state: &AppState,
    user_id: Uuid,
    game_id: &str,
    rating: Option<f64>,
    created_at: chrono::DateTime<chrono::Utc>,
) -> Uuid {
    let log = Log {
        id: Uuid::new_v4(),
        user_id,
        game_id: game_id.to_string(),
        comments: Some(format!("Watched game {}", game_id)),
        rating,
        how_did_you_watch: None,
        viewing_time: None,
        deserved_win: None,
        standout_players: vec![],
        created_at,
    };
    state.db.insert_log(&log).await.expect("Failed to seed log");
    log.id
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Response body was not JSON")
}

// ─── Mock TheSportsDB ────────────────────────────────────────────

/// Game ids the mock provider recognizes.
#[allow(dead_code)]
pub const GAME_BRUINS_LEAFS: &str = "1001"; // 2024-01-15, TD Garden
#[allow(dead_code)]
pub const GAME_KINGS_SHARKS: &str = "1002"; // 2024-02-01, Crypto.com Arena
#[allow(dead_code)]
pub const GAME_BRUINS_HABS: &str = "1003"; // 2023-11-05, TD Garden
/// A game id no longer present upstream.
#[allow(dead_code)]
pub const GAME_UNKNOWN: &str = "9999";
/// A team name that makes the mock provider fail with a 500.
#[allow(dead_code)]
pub const TEAM_OUTAGE: &str = "boom";

#[derive(Deserialize)]
struct IdQuery {
    id: Option<String>,
}

#[derive(Deserialize)]
struct TeamQuery {
    t: Option<String>,
}

async fn lookup_event(Query(params): Query<IdQuery>) -> Json<Value> {
    let event = match params.id.as_deref() {
        Some(GAME_BRUINS_LEAFS) => Some(json!({
            "idEvent": GAME_BRUINS_LEAFS,
            "strEvent": "Boston Bruins vs Toronto Maple Leafs",
            "strSport": "Ice Hockey",
            "strLeague": "NHL",
            "strHomeTeam": "Boston Bruins",
            "strAwayTeam": "Toronto Maple Leafs",
            "intHomeScore": "4",
            "intAwayScore": "2",
            "strVenue": "TD Garden",
            "dateEvent": "2024-01-15",
            "strTime": "19:00:00",
            "strDescriptionEN": "Original Six matchup"
        })),
        Some(GAME_KINGS_SHARKS) => Some(json!({
            "idEvent": GAME_KINGS_SHARKS,
            "strEvent": "Los Angeles Kings vs San Jose Sharks",
            "strSport": "Ice Hockey",
            "strLeague": "NHL",
            "strHomeTeam": "Los Angeles Kings",
            "strAwayTeam": "San Jose Sharks",
            "strVenue": "Crypto.com Arena",
            "dateEvent": "2024-02-01"
        })),
        Some(GAME_BRUINS_HABS) => Some(json!({
            "idEvent": GAME_BRUINS_HABS,
            "strEvent": "Boston Bruins vs Montreal Canadiens",
            "strSport": "Ice Hockey",
            "strLeague": "NHL",
            "strHomeTeam": "Boston Bruins",
            "strAwayTeam": "Montreal Canadiens",
            "strVenue": "TD Garden",
            "dateEvent": "2023-11-05"
        })),
        _ => None,
    };

    Json(json!({ "events": event.map(|e| vec![e]) }))
}

async fn search_teams(Query(params): Query<TeamQuery>) -> Result<Json<Value>, StatusCode> {
    let team = match params.t.as_deref() {
        Some(TEAM_OUTAGE) => return Err(StatusCode::INTERNAL_SERVER_ERROR),
        Some("Boston Bruins") => Some(json!({
            "idTeam": "134830",
            "strTeam": "Boston Bruins",
            "strSport": "Ice Hockey",
            "strLeague": "NHL",
            "strStadium": "TD Garden",
            "strLocation": "Boston, Massachusetts"
        })),
        _ => None,
    };

    Ok(Json(json!({ "teams": team.map(|t| vec![t]) })))
}

async fn lookup_league(Query(params): Query<IdQuery>) -> Json<Value> {
    let league = match params.id.as_deref() {
        Some("4380") => Some(json!({
            "idLeague": "4380",
            "strLeague": "NHL",
            "strSport": "Ice Hockey",
            "strCountry": "USA",
            "intFormedYear": "1917",
            "strCurrentSeason": "2024-2025"
        })),
        _ => None,
    };

    Json(json!({ "leagues": league.map(|l| vec![l]) }))
}

/// Serve a canned slice of TheSportsDB on an ephemeral local port and
/// return its base URL.
#[allow(dead_code)]
pub async fn spawn_mock_sportsdb() -> String {
    let app = Router::new()
        .route("/api/v1/json/123/lookupevent.php", get(lookup_event))
        .route("/api/v1/json/123/searchteams.php", get(search_teams))
        .route("/api/v1/json/123/lookupleague.php", get(lookup_league));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock sportsdb listener");
    let addr = listener.local_addr().expect("Mock listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Mock sportsdb server failed");
    });

    format!("http://{}", addr)
}
