// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Log model for storage and API.

use crate::models::event::SportsEvent;
use crate::models::user::UserSummary;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A user's record of having watched one external event.
///
/// `game_id` points into TheSportsDB, not the local store; the row is
/// valid even when that id no longer resolves upstream.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub id: Uuid,
    pub user_id: Uuid,
    /// External event id (TheSportsDB idEvent)
    pub game_id: String,
    pub comments: Option<String>,
    /// Stored as entered. Historic rows mix 0-5 and 0-10 scales, so the
    /// display value goes through normalization instead of this field.
    pub rating: Option<f64>,
    pub how_did_you_watch: Option<String>,
    pub viewing_time: Option<String>,
    /// 0-100 percentage that the winning side deserved it
    pub deserved_win: Option<i64>,
    /// Ordered free-text player names
    #[sqlx(json)]
    pub standout_players: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// A log joined with its external event and derived display values.
///
/// `event_details` is None when the upstream lookup failed or came back
/// empty; list views render a placeholder for those entries.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWithEvent {
    #[serde(flatten)]
    pub log: Log,
    pub user: Option<UserSummary>,
    /// Rating normalized onto the 0-5 star scale
    pub rating_out_of_five: f64,
    /// Deserved-win percentage clamped to 0-100
    pub deserved_win_pct: Option<u8>,
    pub event_details: Option<SportsEvent>,
}
