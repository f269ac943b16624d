// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (session handling).

pub mod auth;

pub use auth::{load_session, require_auth};
