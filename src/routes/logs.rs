// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Log routes: CRUD plus the enriched per-user listing.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Log, LogWithEvent};
use crate::services::enrichment::{CreateLogRequest, UpdateLogRequest};
use crate::services::lists::{filter_candidate_logs, FilterCriteria};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/logs", post(create_log))
        .route(
            "/logs/{id}",
            get(get_log).put(update_log).delete(delete_log),
        )
        .route("/logs/user/{id}", get(get_user_logs))
}

/// Create a log for the session user.
async fn create_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateLogRequest>,
) -> Result<(StatusCode, Json<Log>)> {
    let log = state.logs.create_log(user.id, body).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// Fetch one log, enriched with its event and owner display name.
///
/// 404 covers both a missing log and a gameId that no longer resolves
/// upstream; the detail view has nothing to show without the event.
async fn get_log(
    State(state): State<Arc<AppState>>,
    Path(log_id): Path<Uuid>,
) -> Result<Json<LogWithEvent>> {
    let entry = state.logs.get_log_detail(log_id).await?;
    Ok(Json(entry))
}

/// Update a log's mutable fields.
async fn update_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(log_id): Path<Uuid>,
    Json(body): Json<UpdateLogRequest>,
) -> Result<Json<Log>> {
    let log = state.logs.update_log(user.id, log_id, body).await?;
    Ok(Json(log))
}

/// Response for log deletion.
#[derive(Serialize)]
pub struct DeleteLogResponse {
    pub success: bool,
    pub message: String,
}

/// Delete a log.
async fn delete_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(log_id): Path<Uuid>,
) -> Result<Json<DeleteLogResponse>> {
    state.logs.delete_log(user.id, log_id).await?;
    Ok(Json(DeleteLogResponse {
        success: true,
        message: "Log deleted".to_string(),
    }))
}

#[derive(Deserialize)]
struct UserLogsQuery {
    /// Free-text search across event fields and comments
    search: Option<String>,
    /// Home-or-away team substring
    team: Option<String>,
    /// Venue substring
    venue: Option<String>,
    /// Inclusive event-date lower bound (YYYY-MM-DD)
    from: Option<String>,
    /// Inclusive event-date upper bound (YYYY-MM-DD)
    to: Option<String>,
}

fn parse_date(raw: Option<&str>, param: &str) -> Result<Option<NaiveDate>> {
    raw.map(|raw| {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            AppError::BadRequest(format!("Invalid '{}' parameter: must be YYYY-MM-DD", param))
        })
    })
    .transpose()
}

/// List all logs for a user, each independently enriched, most recent
/// first. Entries whose event lookup failed carry `eventDetails: null`.
async fn get_user_logs(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<UserLogsQuery>,
) -> Result<Json<Vec<LogWithEvent>>> {
    let criteria = FilterCriteria {
        search: params.search,
        team: params.team,
        venue: params.venue,
        from: parse_date(params.from.as_deref(), "from")?,
        to: parse_date(params.to.as_deref(), "to")?,
        selected: None,
    };

    tracing::debug!(user_id = %user_id, "Fetching enriched logs");

    let entries = state.logs.enrich_logs_for_user(user_id).await?;
    let entries = if criteria.is_empty() {
        entries
    } else {
        filter_candidate_logs(entries, &criteria)
    };

    Ok(Json(entries))
}
