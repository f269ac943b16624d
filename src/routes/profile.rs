// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile routes and local-user provisioning.

use crate::error::{AppError, Result};
use crate::middleware::auth::{AuthUser, SessionState};
use crate::models::User;
use crate::services::profile::{UpdateProfileRequest, UserProfile};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/user/{id}/profile", get(get_profile).put(update_profile))
}

/// Signup only needs a verified token; the local user row is what it
/// creates, so it cannot sit behind `require_auth`.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/user/signup", post(signup))
}

/// Fetch a user's aggregated profile (identity fields + counts).
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserProfile>> {
    let profile = state.profile.get_profile(user_id).await?;
    Ok(Json(profile))
}

/// Update the session user's editable profile fields.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>> {
    let profile = state.profile.update_profile(user.id, user_id, body).await?;
    Ok(Json(profile))
}

/// Materialize the local user row for a provider-authenticated identity.
///
/// 201 on first provisioning, 200 when the row already existed.
async fn signup(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<SessionState>,
) -> Result<(StatusCode, Json<User>)> {
    let (subject, email): (Uuid, Option<String>) = match session {
        SessionState::Authenticated(user) => (user.id, user.email),
        SessionState::Authenticating { subject, email } => (subject, email),
        SessionState::Anonymous => return Err(AppError::Unauthorized),
    };

    let (user, created) = state.profile.provision_user(subject, email.as_deref()).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(user)))
}
