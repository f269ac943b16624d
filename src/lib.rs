// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Matchlog: a social log of watched sports games.
//!
//! This crate provides the backend API for personal game logs, curated
//! lists, and profiles, enriched with event metadata from TheSportsDB.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use services::{ListService, LogService, ProfileService, SportsDbClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub sports: SportsDbClient,
    pub logs: LogService,
    pub lists: ListService,
    pub profile: ProfileService,
}

impl AppState {
    /// Wire up services over a connected database.
    pub fn new(config: Config, db: Database) -> Self {
        let sports = SportsDbClient::new(
            config.sportsdb_base_url.clone(),
            config.sportsdb_api_key.clone(),
        );
        let logs = LogService::new(db.clone(), sports.clone());
        let lists = ListService::new(db.clone());
        let profile = ProfileService::new(db.clone());

        Self {
            config,
            db,
            sports,
            logs,
            lists,
            profile,
        }
    }
}
