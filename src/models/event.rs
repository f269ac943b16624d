// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! External TheSportsDB records.
//!
//! These are never persisted and never cached: fetched per request,
//! passed through to the caller. Every field is optional because the
//! provider freely omits or nulls anything, and the wire names keep the
//! provider's own spelling so responses stay byte-compatible with what
//! clients already consume.

use serde::{Deserialize, Serialize};

/// One event (game) as returned by `lookupevent.php`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportsEvent {
    pub id_event: Option<String>,
    pub id_league: Option<String>,
    pub id_home_team: Option<String>,
    pub id_away_team: Option<String>,
    /// Event title, e.g. "Bruins vs Maple Leafs"
    pub str_event: Option<String>,
    pub str_filename: Option<String>,
    pub str_sport: Option<String>,
    pub str_league: Option<String>,
    pub str_season: Option<String>,
    #[serde(rename = "strDescriptionEN")]
    pub str_description_en: Option<String>,
    pub str_home_team: Option<String>,
    pub str_away_team: Option<String>,
    pub int_home_score: Option<String>,
    pub int_away_score: Option<String>,
    pub int_spectators: Option<String>,
    pub str_venue: Option<String>,
    pub str_city: Option<String>,
    pub str_country: Option<String>,
    /// "2024-01-15"
    pub date_event: Option<String>,
    /// "20:00:00"
    pub str_time: Option<String>,
    pub str_timestamp: Option<String>,
    pub str_thumb: Option<String>,
    pub str_banner: Option<String>,
    pub str_status: Option<String>,
}

/// One team as returned by `searchteams.php`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamData {
    pub id_team: Option<String>,
    pub id_league: Option<String>,
    pub str_team: Option<String>,
    pub str_team_short: Option<String>,
    pub str_team_alternate: Option<String>,
    pub int_formed_year: Option<String>,
    pub str_sport: Option<String>,
    pub str_league: Option<String>,
    pub str_stadium: Option<String>,
    pub int_stadium_capacity: Option<String>,
    pub str_location: Option<String>,
    pub str_website: Option<String>,
    #[serde(rename = "strDescriptionEN")]
    pub str_description_en: Option<String>,
    pub str_country: Option<String>,
    pub str_badge: Option<String>,
    pub str_logo: Option<String>,
    pub str_banner: Option<String>,
}

/// One league as returned by `lookupleague.php`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueData {
    pub id_league: Option<String>,
    pub str_league: Option<String>,
    pub str_league_alternate: Option<String>,
    pub str_sport: Option<String>,
    pub int_formed_year: Option<String>,
    pub date_first_event: Option<String>,
    pub str_current_season: Option<String>,
    pub str_gender: Option<String>,
    pub str_country: Option<String>,
    pub str_website: Option<String>,
    #[serde(rename = "strDescriptionEN")]
    pub str_description_en: Option<String>,
    pub str_tv_rights: Option<String>,
    pub str_badge: Option<String>,
    pub str_logo: Option<String>,
    pub str_banner: Option<String>,
    pub str_trophy: Option<String>,
}
