// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TheSportsDB API client for fetching event, team, and league metadata.
//!
//! The provider is read-only, untrusted, and partially unavailable:
//! - a missing record comes back as a null envelope, not an HTTP 404
//! - transport failures and non-2xx responses surface as `SportsApi`
//! - no retries, no caching, no negative-result memoization

use crate::error::AppError;
use crate::models::{LeagueData, SportsEvent, TeamData};
use serde::Deserialize;
use std::str::FromStr;

/// The four supported leagues, mapped to TheSportsDB's numeric ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum League {
    Nfl,
    Nba,
    Mlb,
    Nhl,
}

impl League {
    /// TheSportsDB league id.
    pub fn external_id(self) -> &'static str {
        match self {
            League::Nfl => "4391",
            League::Nba => "4387",
            League::Mlb => "4424",
            League::Nhl => "4380",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            League::Nfl => "nfl",
            League::Nba => "nba",
            League::Mlb => "mlb",
            League::Nhl => "nhl",
        }
    }
}

impl FromStr for League {
    type Err = AppError;

    /// An unknown abbreviation is a caller mistake, not a provider fault.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nfl" => Ok(League::Nfl),
            "nba" => Ok(League::Nba),
            "mlb" => Ok(League::Mlb),
            "nhl" => Ok(League::Nhl),
            _ => Err(AppError::BadRequest("Invalid league parameter".to_string())),
        }
    }
}

/// TheSportsDB API client.
#[derive(Clone)]
pub struct SportsDbClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SportsDbClient {
    /// Create a new client. `base_url` has no trailing slash; the key is
    /// part of the URL path on this provider.
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Look up a single event by its TheSportsDB id.
    ///
    /// Returns Ok(None) when the provider reports zero matches.
    pub async fn fetch_event(&self, game_id: &str) -> Result<Option<SportsEvent>, AppError> {
        let url = format!("{}?id={}", self.endpoint("lookupevent.php"), game_id);
        let envelope: EventsEnvelope = self.get_json(&url).await?;
        Ok(first(envelope.events))
    }

    /// Search for a team by name and return the first match.
    pub async fn fetch_team(&self, name: &str) -> Result<Option<TeamData>, AppError> {
        let url = format!(
            "{}?t={}",
            self.endpoint("searchteams.php"),
            urlencoding::encode(name)
        );
        let envelope: TeamsEnvelope = self.get_json(&url).await?;
        Ok(first(envelope.teams))
    }

    /// Look up one of the four supported leagues.
    pub async fn fetch_league(&self, league: League) -> Result<Option<LeagueData>, AppError> {
        let url = format!(
            "{}?id={}",
            self.endpoint("lookupleague.php"),
            league.external_id()
        );
        let envelope: LeaguesEnvelope = self.get_json(&url).await?;
        Ok(first(envelope.leagues))
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/api/v1/json/{}/{}", self.base_url, self.api_key, name)
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::SportsApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SportsApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::SportsApi(format!("JSON parse error: {}", e)))
    }
}

/// Take the first record of an envelope; the provider encodes "no
/// matches" as a null array.
fn first<T>(records: Option<Vec<T>>) -> Option<T> {
    records.unwrap_or_default().into_iter().next()
}

#[derive(Deserialize)]
struct EventsEnvelope {
    events: Option<Vec<SportsEvent>>,
}

#[derive(Deserialize)]
struct TeamsEnvelope {
    teams: Option<Vec<TeamData>>,
}

#[derive(Deserialize)]
struct LeaguesEnvelope {
    leagues: Option<Vec<LeagueData>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_league_parse_accepts_known_abbreviations() {
        assert_eq!("nhl".parse::<League>().unwrap(), League::Nhl);
        assert_eq!("NBA".parse::<League>().unwrap(), League::Nba);
        assert_eq!("Mlb".parse::<League>().unwrap(), League::Mlb);
        assert_eq!("nfl".parse::<League>().unwrap(), League::Nfl);
    }

    #[test]
    fn test_league_parse_rejects_unknown() {
        let err = "xyz".parse::<League>().unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_league_external_ids() {
        assert_eq!(League::Nfl.external_id(), "4391");
        assert_eq!(League::Nba.external_id(), "4387");
        assert_eq!(League::Mlb.external_id(), "4424");
        assert_eq!(League::Nhl.external_id(), "4380");
    }

    #[test]
    fn test_null_envelope_is_no_match() {
        let envelope: EventsEnvelope = serde_json::from_str(r#"{"events": null}"#).unwrap();
        assert!(first(envelope.events).is_none());
    }

    #[test]
    fn test_envelope_takes_first_record() {
        let envelope: EventsEnvelope = serde_json::from_str(
            r#"{"events": [
                {"idEvent": "1001", "strEvent": "Bruins vs Maple Leafs"},
                {"idEvent": "1002", "strEvent": "Kings vs Sharks"}
            ]}"#,
        )
        .unwrap();

        let event = first(envelope.events).unwrap();
        assert_eq!(event.id_event.as_deref(), Some("1001"));
        assert_eq!(event.str_event.as_deref(), Some("Bruins vs Maple Leafs"));
    }

    #[test]
    fn test_endpoint_includes_api_key_path() {
        let client = SportsDbClient::new("https://example.test".to_string(), "123".to_string());
        assert_eq!(
            client.endpoint("lookupevent.php"),
            "https://example.test/api/v1/json/123/lookupevent.php"
        );
    }
}
