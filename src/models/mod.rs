// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod event;
pub mod list;
pub mod log;
pub mod user;

pub use event::{LeagueData, SportsEvent, TeamData};
pub use list::{List, ListWithLogs};
pub use log::{Log, LogWithEvent};
pub use user::{User, UserSummary};
