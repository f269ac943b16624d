// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod enrichment;
pub mod lists;
pub mod profile;
pub mod sportsdb;

pub use enrichment::LogService;
pub use lists::ListService;
pub use profile::ProfileService;
pub use sportsdb::{League, SportsDbClient};
