// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! List routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::ListWithLogs;
use crate::services::lists::CreateListRequest;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/lists", get(list_lists).post(create_list))
}

/// Create a list of the session user's own logs.
async fn create_list(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<CreateListRequest>,
) -> Result<(StatusCode, Json<ListWithLogs>)> {
    let list = state.lists.create_list(user.id, body).await?;
    Ok((StatusCode::CREATED, Json(list)))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListsQuery {
    user_id: Option<Uuid>,
}

/// List lists, optionally scoped to one user, most recent first.
async fn list_lists(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListsQuery>,
) -> Result<Json<Vec<ListWithLogs>>> {
    let lists = state.lists.list_lists(params.user_id).await?;
    Ok(Json(lists))
}
