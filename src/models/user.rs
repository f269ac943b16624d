//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User row in the local store.
///
/// The id is the subject the identity provider asserted at signup; the
/// provider owns credentials, we only own the profile.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Email address (may be None if the provider did not share it)
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub favorite_team: Option<String>,
    pub favorite_player: Option<String>,
    pub favorite_league: Option<String>,
    pub avatar_url: Option<String>,
    /// When the local row was provisioned
    pub created_at: DateTime<Utc>,
}

/// Owner attribution attached to enriched logs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub display_name: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name.clone(),
        }
    }
}
