// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Log enrichment service.
//!
//! Joins persisted logs with their external events and computes derived
//! display values. The partial-failure contract differs by context:
//! - listing: a failed or empty event lookup degrades that entry to
//!   `event_details: null` and never aborts the rest
//! - detail: the event is the page's primary content, so its absence is
//!   a NotFound

use crate::db::Database;
use crate::error::AppError;
use crate::models::{Log, LogWithEvent, UserSummary};
use crate::services::sportsdb::SportsDbClient;
use futures_util::{stream, StreamExt};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// Upper bound on in-flight event lookups per request.
const MAX_CONCURRENT_EVENT_FETCHES: usize = 8;

/// Log CRUD and enrichment.
#[derive(Clone)]
pub struct LogService {
    db: Database,
    sports: SportsDbClient,
}

/// Payload for creating a log.
///
/// `user_id` and `game_id` are required but deserialize as optional, so
/// an absent key is a 400 with a message rather than a decode rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogRequest {
    pub user_id: Option<Uuid>,
    pub game_id: Option<String>,
    pub comments: Option<String>,
    /// The UI has historically sent this as a number or a numeric string.
    #[serde(default, deserialize_with = "rating_from_json")]
    pub rating: Option<f64>,
    pub how_did_you_watch: Option<String>,
    pub viewing_time: Option<String>,
    pub deserved_win: Option<i64>,
    pub standout_players: Option<Vec<String>>,
}

/// Payload for overwriting a log's mutable fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogRequest {
    pub comments: Option<String>,
    #[serde(default, deserialize_with = "rating_from_json")]
    pub rating: Option<f64>,
    pub how_did_you_watch: Option<String>,
    pub viewing_time: Option<String>,
    pub deserved_win: Option<i64>,
    pub standout_players: Option<Vec<String>>,
}

impl LogService {
    pub fn new(db: Database, sports: SportsDbClient) -> Self {
        Self { db, sports }
    }

    /// Create a log for the session user.
    pub async fn create_log(&self, owner: Uuid, req: CreateLogRequest) -> Result<Log, AppError> {
        let user_id = req
            .user_id
            .ok_or_else(|| AppError::BadRequest("userId is required".to_string()))?;
        if user_id != owner {
            return Err(AppError::BadRequest(
                "userId must match the authenticated user".to_string(),
            ));
        }
        let game_id = req.game_id.as_deref().map(str::trim).unwrap_or_default();
        if game_id.is_empty() {
            return Err(AppError::BadRequest("gameId is required".to_string()));
        }

        let log = Log {
            id: Uuid::new_v4(),
            user_id: owner,
            game_id: game_id.to_string(),
            comments: req.comments,
            rating: req.rating,
            how_did_you_watch: req.how_did_you_watch,
            viewing_time: req.viewing_time,
            deserved_win: req.deserved_win,
            standout_players: clean_players(req.standout_players),
            created_at: chrono::Utc::now(),
        };

        self.db.insert_log(&log).await?;
        tracing::info!(log_id = %log.id, game_id = %log.game_id, "Log created");
        Ok(log)
    }

    /// Fetch one log with its event and owner display name.
    ///
    /// The detail view cannot render without the event, so an
    /// unresolvable gameId is a NotFound here, unlike in listings.
    pub async fn get_log_detail(&self, log_id: Uuid) -> Result<LogWithEvent, AppError> {
        let log = self
            .db
            .get_log(log_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Log {} not found", log_id)))?;

        let user = self.db.get_user(log.user_id).await?;
        let event = self
            .sports
            .fetch_event(&log.game_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Event {} not found upstream", log.game_id))
            })?;

        Ok(enriched(log, user.as_ref().map(UserSummary::from), Some(event)))
    }

    /// Fetch all of a user's logs, each enriched independently.
    ///
    /// Event lookups run concurrently; `buffered` keeps the output in
    /// submission order, so creation-time-descending order survives
    /// whatever order the fetches complete in.
    pub async fn enrich_logs_for_user(&self, user_id: Uuid) -> Result<Vec<LogWithEvent>, AppError> {
        let logs = self.db.get_logs_for_user(user_id).await?;
        let owner = self
            .db
            .get_user(user_id)
            .await?
            .as_ref()
            .map(UserSummary::from);

        let entries = stream::iter(logs)
            .map(|log| self.enrich_log(log, owner.clone()))
            .buffered(MAX_CONCURRENT_EVENT_FETCHES)
            .collect::<Vec<_>>()
            .await;

        Ok(entries)
    }

    /// Attach the external event to a single log, degrading to None on
    /// any upstream miss or failure.
    pub async fn enrich_log(&self, log: Log, user: Option<UserSummary>) -> LogWithEvent {
        let event = match self.sports.fetch_event(&log.game_id).await {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(
                    log_id = %log.id,
                    game_id = %log.game_id,
                    error = %e,
                    "Event lookup failed; returning log without event details"
                );
                None
            }
        };

        enriched(log, user, event)
    }

    /// Overwrite a log's mutable fields.
    pub async fn update_log(
        &self,
        owner: Uuid,
        log_id: Uuid,
        req: UpdateLogRequest,
    ) -> Result<Log, AppError> {
        self.require_owned(owner, log_id).await?;

        let players = clean_players(req.standout_players);
        let updated = self
            .db
            .update_log(
                log_id,
                req.comments.as_deref(),
                req.rating,
                req.how_did_you_watch.as_deref(),
                req.viewing_time.as_deref(),
                req.deserved_win,
                &players,
            )
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Log {} not found", log_id)))?;

        Ok(updated)
    }

    /// Delete a log permanently. Unknown ids are reported, not ignored.
    pub async fn delete_log(&self, owner: Uuid, log_id: Uuid) -> Result<(), AppError> {
        self.require_owned(owner, log_id).await?;

        if !self.db.delete_log(log_id).await? {
            return Err(AppError::NotFound(format!("Log {} not found", log_id)));
        }
        tracing::info!(log_id = %log_id, "Log deleted");
        Ok(())
    }

    /// The mutating paths check ownership here; hiding edit controls in
    /// the UI is not a security boundary.
    async fn require_owned(&self, owner: Uuid, log_id: Uuid) -> Result<Log, AppError> {
        let log = self
            .db
            .get_log(log_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Log {} not found", log_id)))?;

        if log.user_id != owner {
            return Err(AppError::BadRequest(
                "Log does not belong to the authenticated user".to_string(),
            ));
        }
        Ok(log)
    }
}

/// Build the enriched view of a log, with derived display values.
pub fn enriched(
    log: Log,
    user: Option<UserSummary>,
    event_details: Option<crate::models::SportsEvent>,
) -> LogWithEvent {
    let rating_out_of_five = normalize_rating_to_five(log.rating);
    let deserved_win_pct = log.deserved_win.map(|p| p.clamp(0, 100) as u8);
    LogWithEvent {
        log,
        user,
        rating_out_of_five,
        deserved_win_pct,
        event_details,
    }
}

/// Normalize a stored rating onto the 0-5 star scale.
///
/// Historic rows mix 0-5 and 0-10 scales; anything above 5 is treated as
/// a 10-point value and halved. That heuristic is ambiguous for genuine
/// 5-10 outliers and is kept exactly as shipped rather than guessed at.
pub fn normalize_rating_to_five(raw: Option<f64>) -> f64 {
    let Some(numeric) = raw else {
        return 0.0;
    };
    if !numeric.is_finite() {
        return 0.0;
    }

    let maybe_ten_scale = if numeric > 5.0 { numeric / 2.0 } else { numeric };
    maybe_ten_scale.clamp(0.0, 5.0)
}

/// Drop blank entries the UI leaves behind in the players editor.
fn clean_players(players: Option<Vec<String>>) -> Vec<String> {
    players
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect()
}

/// Accept a rating as a JSON number, a numeric string, or null.
fn rating_from_json<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRating {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<RawRating>::deserialize(deserializer)? {
        None => None,
        Some(RawRating::Number(n)) => Some(n),
        Some(RawRating::Text(s)) => s.trim().parse::<f64>().ok(),
    })
}
