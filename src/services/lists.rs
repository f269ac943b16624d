// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! List curation service.
//!
//! Lists are named groupings of a user's own logs. Membership is fixed
//! at creation; linking a log that belongs to someone else is rejected
//! server-side, not just hidden by the UI.

use crate::db::Database;
use crate::error::AppError;
use crate::models::{List, ListWithLogs, LogWithEvent};
use chrono::NaiveDate;
use uuid::Uuid;

/// List CRUD and candidate filtering.
#[derive(Clone)]
pub struct ListService {
    db: Database,
}

/// Payload for creating a list.
///
/// `user_id` and `name` are required but deserialize as optional, so an
/// absent key is a 400 with a message rather than a decode rejection.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListRequest {
    pub user_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub log_ids: Option<Vec<Uuid>>,
}

impl ListService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Create a list and link the given logs to it.
    pub async fn create_list(
        &self,
        owner: Uuid,
        req: CreateListRequest,
    ) -> Result<ListWithLogs, AppError> {
        let user_id = req
            .user_id
            .ok_or_else(|| AppError::BadRequest("userId is required".to_string()))?;
        if user_id != owner {
            return Err(AppError::BadRequest(
                "userId must match the authenticated user".to_string(),
            ));
        }

        let name = req.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(AppError::BadRequest("name is required".to_string()));
        }

        // Empty-after-trim descriptions are stored as absent
        let description = req
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        // Every linked log must exist and belong to the list's owner
        let log_ids = req.log_ids.unwrap_or_default();
        for log_id in &log_ids {
            let log = self
                .db
                .get_log(*log_id)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("Unknown log id {}", log_id)))?;
            if log.user_id != owner {
                return Err(AppError::BadRequest(format!(
                    "Log {} does not belong to the authenticated user",
                    log_id
                )));
            }
        }

        let list = List {
            id: Uuid::new_v4(),
            user_id: owner,
            name: name.to_string(),
            description,
            created_at: chrono::Utc::now(),
        };

        self.db.insert_list(&list, &log_ids).await?;
        tracing::info!(list_id = %list.id, logs = log_ids.len(), "List created");

        let logs = self.db.get_logs_for_list(list.id).await?;
        Ok(ListWithLogs { list, logs })
    }

    /// All lists, optionally scoped to one user, most recent first,
    /// each with its associated logs attached.
    pub async fn list_lists(&self, user_id: Option<Uuid>) -> Result<Vec<ListWithLogs>, AppError> {
        let lists = self.db.get_lists(user_id).await?;

        let mut result = Vec::with_capacity(lists.len());
        for list in lists {
            let logs = self.db.get_logs_for_list(list.id).await?;
            result.push(ListWithLogs { list, logs });
        }
        Ok(result)
    }
}

/// Criteria for narrowing an already-enriched candidate set. All
/// criteria are optional and AND-combined.
#[derive(Debug, Default, Clone)]
pub struct FilterCriteria {
    /// Case-insensitive substring over event title, teams, venue,
    /// event description, and log comments
    pub search: Option<String>,
    /// Substring against home-or-away team name
    pub team: Option<String>,
    /// Substring against the venue name
    pub venue: Option<String>,
    /// Inclusive lower bound on the event date
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the event date
    pub to: Option<NaiveDate>,
    /// When set, restrict to logs already chosen for the in-progress list
    pub selected: Option<Vec<Uuid>>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search.is_none()
            && self.team.is_none()
            && self.venue.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.selected.is_none()
    }
}

/// Narrow a set of enriched logs to the ones matching `criteria`.
///
/// Pure and in-memory: the candidates were already fetched and enriched.
/// A date bound with no resolvable event date excludes the candidate
/// (fails toward exclusion, not inclusion).
pub fn filter_candidate_logs(
    logs: Vec<LogWithEvent>,
    criteria: &FilterCriteria,
) -> Vec<LogWithEvent> {
    let search = normalized(&criteria.search);
    let team = normalized(&criteria.team);
    let venue = normalized(&criteria.venue);

    logs.into_iter()
        .filter(|entry| {
            if let Some(selected) = &criteria.selected {
                if !selected.contains(&entry.log.id) {
                    return false;
                }
            }

            let event = entry.event_details.as_ref();

            if let Some(query) = &search {
                let haystack = [
                    event.and_then(|e| e.str_event.as_deref()),
                    event.and_then(|e| e.str_home_team.as_deref()),
                    event.and_then(|e| e.str_away_team.as_deref()),
                    event.and_then(|e| e.str_venue.as_deref()),
                    event.and_then(|e| e.str_description_en.as_deref()),
                    entry.log.comments.as_deref(),
                ]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();

                if !haystack.contains(query) {
                    return false;
                }
            }

            if let Some(team) = &team {
                let home = lowered(event.and_then(|e| e.str_home_team.as_deref()));
                let away = lowered(event.and_then(|e| e.str_away_team.as_deref()));
                if !home.contains(team) && !away.contains(team) {
                    return false;
                }
            }

            if let Some(venue) = &venue {
                if !lowered(event.and_then(|e| e.str_venue.as_deref())).contains(venue) {
                    return false;
                }
            }

            if criteria.from.is_some() || criteria.to.is_some() {
                let Some(event_date) = event
                    .and_then(|e| e.date_event.as_deref())
                    .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
                else {
                    return false;
                };

                if let Some(from) = criteria.from {
                    if event_date < from {
                        return false;
                    }
                }
                if let Some(to) = criteria.to {
                    if event_date > to {
                        return false;
                    }
                }
            }

            true
        })
        .collect()
}

/// Trimmed, lowercased criterion; blank input means "not filtering".
fn normalized(criterion: &Option<String>) -> Option<String> {
    criterion
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase)
}

fn lowered(value: Option<&str>) -> String {
    value.unwrap_or_default().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Log, SportsEvent};
    use crate::services::enrichment::enriched;

    fn candidate(comments: Option<&str>, event: Option<SportsEvent>) -> LogWithEvent {
        let log = Log {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            game_id: "1001".to_string(),
            comments: comments.map(str::to_string),
            rating: None,
            how_did_you_watch: None,
            viewing_time: None,
            deserved_win: None,
            standout_players: vec![],
            created_at: chrono::Utc::now(),
        };
        enriched(log, None, event)
    }

    fn event(home: &str, away: &str, venue: &str, date: Option<&str>) -> SportsEvent {
        SportsEvent {
            id_event: Some("1001".to_string()),
            id_league: None,
            id_home_team: None,
            id_away_team: None,
            str_event: Some(format!("{} vs {}", home, away)),
            str_filename: None,
            str_sport: Some("Ice Hockey".to_string()),
            str_league: Some("NHL".to_string()),
            str_season: None,
            str_description_en: Some("Regular season matchup".to_string()),
            str_home_team: Some(home.to_string()),
            str_away_team: Some(away.to_string()),
            int_home_score: None,
            int_away_score: None,
            int_spectators: None,
            str_venue: Some(venue.to_string()),
            str_city: None,
            str_country: None,
            date_event: date.map(str::to_string),
            str_time: None,
            str_timestamp: None,
            str_thumb: None,
            str_banner: None,
            str_status: None,
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_criteria_passes_everything() {
        let logs = vec![
            candidate(None, Some(event("Bruins", "Leafs", "TD Garden", None))),
            candidate(None, None),
        ];
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(filter_candidate_logs(logs, &criteria).len(), 2);
    }

    #[test]
    fn test_team_matches_home_or_away_case_insensitive() {
        let logs = vec![
            candidate(None, Some(event("Bruins", "Leafs", "TD Garden", None))),
            candidate(None, Some(event("Kings", "Bruins", "Crypto Arena", None))),
            candidate(None, Some(event("Kings", "Sharks", "Crypto Arena", None))),
        ];
        let criteria = FilterCriteria {
            team: Some("BRUINS".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_candidate_logs(logs, &criteria).len(), 2);
    }

    #[test]
    fn test_venue_substring_match() {
        let logs = vec![
            candidate(None, Some(event("Bruins", "Leafs", "TD Garden", None))),
            candidate(None, Some(event("Kings", "Sharks", "Crypto Arena", None))),
        ];
        let criteria = FilterCriteria {
            venue: Some("garden".to_string()),
            ..Default::default()
        };
        let result = filter_candidate_logs(logs, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0]
                .event_details
                .as_ref()
                .unwrap()
                .str_venue
                .as_deref(),
            Some("TD Garden")
        );
    }

    #[test]
    fn test_free_text_searches_comments_too() {
        let logs = vec![
            candidate(
                Some("What an overtime finish"),
                Some(event("Bruins", "Leafs", "TD Garden", None)),
            ),
            candidate(Some("Quiet game"), None),
        ];
        let criteria = FilterCriteria {
            search: Some("overtime".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_candidate_logs(logs, &criteria).len(), 1);
    }

    #[test]
    fn test_date_range_is_inclusive_and_excludes_undated() {
        let logs = vec![
            candidate(None, Some(event("A", "B", "X", Some("2024-01-01")))),
            candidate(None, Some(event("C", "D", "Y", Some("2024-01-31")))),
            candidate(None, Some(event("E", "F", "Z", Some("2024-02-01")))),
            // No event date at all: excluded once a bound is set
            candidate(None, Some(event("G", "H", "W", None))),
            // No event at all: same
            candidate(None, None),
        ];
        let criteria = FilterCriteria {
            from: Some(date("2024-01-01")),
            to: Some(date("2024-01-31")),
            ..Default::default()
        };
        let result = filter_candidate_logs(logs, &criteria);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_unparseable_event_date_is_excluded() {
        let logs = vec![candidate(
            None,
            Some(event("A", "B", "X", Some("not-a-date"))),
        )];
        let criteria = FilterCriteria {
            from: Some(date("2024-01-01")),
            ..Default::default()
        };
        assert!(filter_candidate_logs(logs, &criteria).is_empty());
    }

    #[test]
    fn test_selected_only_restricts_to_chosen_ids() {
        let first = candidate(None, None);
        let second = candidate(None, None);
        let chosen = first.log.id;

        let criteria = FilterCriteria {
            selected: Some(vec![chosen]),
            ..Default::default()
        };
        let result = filter_candidate_logs(vec![first, second], &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].log.id, chosen);
    }

    #[test]
    fn test_criteria_are_and_combined() {
        let logs = vec![
            candidate(None, Some(event("Bruins", "Leafs", "TD Garden", Some("2024-01-10")))),
            candidate(None, Some(event("Bruins", "Kings", "Crypto Arena", Some("2024-01-10")))),
        ];
        let criteria = FilterCriteria {
            team: Some("bruins".to_string()),
            venue: Some("garden".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_candidate_logs(logs, &criteria).len(), 1);
    }
}
