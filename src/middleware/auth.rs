// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session middleware.
//!
//! Authentication itself lives at the external identity provider; this
//! service only verifies the HS256 tokens the provider issued. Every
//! request gets an explicit `SessionState` in its extensions instead of
//! ambient auth context:
//! - `Anonymous`: no token, or one that failed verification
//! - `Authenticating`: a verified identity whose local user row has not
//!   been provisioned yet (between provider signup and our signup call)
//! - `Authenticated`: verified identity with a local user row

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Session token claims, as issued by the identity provider.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Email the provider verified, if shared
    pub email: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
}

/// Authenticated user extracted from a verified session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Explicit per-request session object.
#[derive(Debug, Clone)]
pub enum SessionState {
    Anonymous,
    Authenticating {
        subject: Uuid,
        email: Option<String>,
    },
    Authenticated(AuthUser),
}

/// Middleware that resolves the session for every request.
///
/// Never rejects by itself; handlers and `require_auth` decide what a
/// given state means for them.
pub async fn load_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let session = resolve_session(&state, &jar, &request).await;
    request.extensions_mut().insert(session);
    next.run(request).await
}

async fn resolve_session(state: &AppState, jar: &CookieJar, request: &Request) -> SessionState {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get("matchlog_token") {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header {
            Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
            _ => return SessionState::Anonymous,
        }
    };

    let key = DecodingKey::from_secret(&state.config.session_signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let claims = match decode::<Claims>(&token, &key, &validation) {
        Ok(data) => data.claims,
        Err(_) => return SessionState::Anonymous,
    };

    let Ok(subject) = claims.sub.parse::<Uuid>() else {
        return SessionState::Anonymous;
    };

    match state.db.get_user(subject).await {
        Ok(Some(user)) => SessionState::Authenticated(AuthUser {
            id: user.id,
            email: user.email,
        }),
        Ok(None) => SessionState::Authenticating {
            subject,
            email: claims.email,
        },
        Err(e) => {
            tracing::error!(error = %e, "Session lookup failed");
            SessionState::Anonymous
        }
    }
}

/// Middleware for routes that require a fully provisioned session.
pub async fn require_auth(mut request: Request, next: Next) -> Result<Response, StatusCode> {
    let session = request
        .extensions()
        .get::<SessionState>()
        .cloned()
        .unwrap_or(SessionState::Anonymous);

    match session {
        SessionState::Authenticated(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Mint a session token the way the identity provider does (tests and
/// local development).
pub fn create_session_token(
    user_id: Uuid,
    email: Option<&str>,
    signing_key: &[u8],
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.map(str::to_string),
        exp: now + 30 * 24 * 60 * 60, // 30 days
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}
