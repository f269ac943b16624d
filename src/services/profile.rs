// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile aggregation service.
//!
//! A profile is the user's editable identity fields plus activity
//! counts. Counts are the cardinality of each owned collection at
//! request time; nothing is cached or incrementally maintained.

use crate::db::Database;
use crate::error::AppError;
use crate::models::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile reads, updates, and identity provisioning.
#[derive(Clone)]
pub struct ProfileService {
    db: Database,
}

/// Aggregated profile response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub counts: ProfileCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileCounts {
    pub logs: i64,
    pub lists: i64,
    pub journals: i64,
}

/// Payload for overwriting the editable profile fields.
///
/// Email and id are immutable through this path. Favorite fields are
/// free text and deliberately not cross-checked against each other.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub favorite_team: Option<String>,
    pub favorite_player: Option<String>,
    pub favorite_league: Option<String>,
    pub avatar_url: Option<String>,
}

impl ProfileService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Fetch a user's profile with per-request activity counts.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<UserProfile, AppError> {
        let user = self
            .db
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        let (logs, lists, journals) = self.db.count_user_activity(user_id).await?;

        Ok(UserProfile {
            user,
            counts: ProfileCounts {
                logs,
                lists,
                journals,
            },
        })
    }

    /// Overwrite the six editable profile fields.
    pub async fn update_profile(
        &self,
        owner: Uuid,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<UserProfile, AppError> {
        if user_id != owner {
            return Err(AppError::BadRequest(
                "Profile can only be updated by its owner".to_string(),
            ));
        }

        let updated = self
            .db
            .update_profile(
                user_id,
                req.display_name.as_deref(),
                req.bio.as_deref(),
                req.favorite_team.as_deref(),
                req.favorite_player.as_deref(),
                req.favorite_league.as_deref(),
                req.avatar_url.as_deref(),
            )
            .await?;

        if !updated {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        self.get_profile(user_id).await
    }

    /// Create the local row for a provider-authenticated identity.
    ///
    /// Signup happens at the identity provider; this just materializes
    /// our side of it. Calling it again for an existing user is a no-op.
    pub async fn provision_user(
        &self,
        user_id: Uuid,
        email: Option<&str>,
    ) -> Result<(User, bool), AppError> {
        if let Some(existing) = self.db.get_user(user_id).await? {
            return Ok((existing, false));
        }

        let user = self.db.provision_user(user_id, email).await?;
        tracing::info!(user_id = %user.id, "Provisioned local user for external identity");
        Ok((user, true))
    }
}
