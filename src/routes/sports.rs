// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! League and team metadata routes, proxied from TheSportsDB.

use crate::error::{AppError, Result};
use crate::models::{LeagueData, TeamData};
use crate::services::League;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/leagues", get(get_league))
        .route("/teams", get(get_team))
}

#[derive(Deserialize)]
struct LeagueQuery {
    league: Option<String>,
}

/// Fetch metadata for one of the four supported leagues.
async fn get_league(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeagueQuery>,
) -> Result<Json<LeagueData>> {
    let league = params
        .league
        .ok_or_else(|| AppError::BadRequest("League parameter is required".to_string()))?;
    let league: League = league.parse()?;

    tracing::debug!(league = league.as_str(), "Fetching league metadata");

    let data = state
        .sports
        .fetch_league(league)
        .await?
        .ok_or_else(|| AppError::NotFound("League not found".to_string()))?;

    Ok(Json(data))
}

#[derive(Deserialize)]
struct TeamQuery {
    team: Option<String>,
}

/// Fetch metadata for a team by search name.
async fn get_team(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TeamQuery>,
) -> Result<Json<TeamData>> {
    let team = params
        .team
        .ok_or_else(|| AppError::BadRequest("team parameter is required".to_string()))?;

    tracing::debug!(team = %team, "Fetching team metadata");

    let data = state
        .sports
        .fetch_team(&team)
        .await?
        .ok_or_else(|| AppError::NotFound("Team not found".to_string()))?;

    Ok(Json(data))
}
