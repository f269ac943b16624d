// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! List model for storage and API.

use crate::models::log::Log;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A named, user-owned grouping of logs.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Non-empty after trimming
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A list with its associated logs attached.
///
/// Association, not copy: a log can be linked from many lists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWithLogs {
    #[serde(flatten)]
    pub list: List,
    pub logs: Vec<Log>,
}
