// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite store wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile storage + activity counts)
//! - Logs (one row per watched game)
//! - Lists (named groupings of logs, linked via list_logs)
//! - Journals (counted on profiles only)

use crate::error::AppError;
use crate::models::{List, Log, User};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Database client backed by a sqlx connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and create the schema if needed.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to SQLite: {}", e)))?;

        let db = Self { pool };
        db.init_schema().await?;

        tracing::info!(url = database_url, "Connected to SQLite");
        Ok(db)
    }

    /// Connect to a private in-memory database (tests).
    ///
    /// A single connection is required: each new in-memory connection
    /// would otherwise get its own empty database.
    pub async fn connect_in_memory() -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| AppError::Database(format!("Failed to open in-memory SQLite: {}", e)))?;

        let db = Self { pool };
        db.init_schema().await?;
        Ok(db)
    }

    /// Create tables if they do not exist. Idempotent, runs at startup.
    async fn init_schema(&self) -> Result<(), AppError> {
        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id              BLOB PRIMARY KEY,
                email           TEXT UNIQUE,
                display_name    TEXT,
                bio             TEXT,
                favorite_team   TEXT,
                favorite_player TEXT,
                favorite_league TEXT,
                avatar_url      TEXT,
                created_at      TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS logs (
                id                BLOB PRIMARY KEY,
                user_id           BLOB NOT NULL REFERENCES users(id),
                game_id           TEXT NOT NULL,
                comments          TEXT,
                rating            REAL,
                how_did_you_watch TEXT,
                viewing_time      TEXT,
                deserved_win      INTEGER,
                standout_players  TEXT NOT NULL DEFAULT '[]',
                created_at        TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS logs_user_id_idx ON logs(user_id)",
            r#"
            CREATE TABLE IF NOT EXISTS lists (
                id          BLOB PRIMARY KEY,
                user_id     BLOB NOT NULL REFERENCES users(id),
                name        TEXT NOT NULL,
                description TEXT,
                created_at  TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS list_logs (
                list_id BLOB NOT NULL REFERENCES lists(id) ON DELETE CASCADE,
                log_id  BLOB NOT NULL REFERENCES logs(id) ON DELETE CASCADE,
                PRIMARY KEY (list_id, log_id)
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS journals (
                id         BLOB PRIMARY KEY,
                user_id    BLOB NOT NULL REFERENCES users(id),
                title      TEXT,
                body       TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        ];

        for stmt in statements {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by id.
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create the local row for a provider-asserted identity, if absent.
    pub async fn provision_user(
        &self,
        user_id: Uuid,
        email: Option<&str>,
    ) -> Result<User, AppError> {
        sqlx::query(
            "INSERT INTO users (id, email, created_at) VALUES (?, ?, ?) \
             ON CONFLICT(id) DO NOTHING",
        )
        .bind(user_id)
        .bind(email)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.get_user(user_id).await?.ok_or_else(|| {
            AppError::Database(format!("User {} missing after provisioning", user_id))
        })
    }

    /// Overwrite the editable profile fields. Returns false for unknown users.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        display_name: Option<&str>,
        bio: Option<&str>,
        favorite_team: Option<&str>,
        favorite_player: Option<&str>,
        favorite_league: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET display_name = ?, bio = ?, favorite_team = ?, \
             favorite_player = ?, favorite_league = ?, avatar_url = ? WHERE id = ?",
        )
        .bind(display_name)
        .bind(bio)
        .bind(favorite_team)
        .bind(favorite_player)
        .bind(favorite_league)
        .bind(avatar_url)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    /// Count a user's logs, lists, and journals in one round trip.
    ///
    /// Recomputed on every call; profile counts are not cached anywhere.
    pub async fn count_user_activity(&self, user_id: Uuid) -> Result<(i64, i64, i64), AppError> {
        sqlx::query_as::<_, (i64, i64, i64)>(
            "SELECT \
             (SELECT COUNT(*) FROM logs WHERE user_id = ?1), \
             (SELECT COUNT(*) FROM lists WHERE user_id = ?1), \
             (SELECT COUNT(*) FROM journals WHERE user_id = ?1)",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Log Operations ──────────────────────────────────────────

    /// Insert a log row.
    pub async fn insert_log(&self, log: &Log) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO logs (id, user_id, game_id, comments, rating, how_did_you_watch, \
             viewing_time, deserved_win, standout_players, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(log.id)
        .bind(log.user_id)
        .bind(&log.game_id)
        .bind(&log.comments)
        .bind(log.rating)
        .bind(&log.how_did_you_watch)
        .bind(&log.viewing_time)
        .bind(log.deserved_win)
        .bind(Json(&log.standout_players))
        .bind(log.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Get a log by id.
    pub async fn get_log(&self, log_id: Uuid) -> Result<Option<Log>, AppError> {
        sqlx::query_as::<_, Log>("SELECT * FROM logs WHERE id = ?")
            .bind(log_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all logs owned by a user, most recent first.
    pub async fn get_logs_for_user(&self, user_id: Uuid) -> Result<Vec<Log>, AppError> {
        sqlx::query_as::<_, Log>("SELECT * FROM logs WHERE user_id = ? ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Overwrite the mutable fields of a log. Returns the updated row,
    /// or None for unknown ids.
    pub async fn update_log(
        &self,
        log_id: Uuid,
        comments: Option<&str>,
        rating: Option<f64>,
        how_did_you_watch: Option<&str>,
        viewing_time: Option<&str>,
        deserved_win: Option<i64>,
        standout_players: &[String],
    ) -> Result<Option<Log>, AppError> {
        let result = sqlx::query(
            "UPDATE logs SET comments = ?, rating = ?, how_did_you_watch = ?, \
             viewing_time = ?, deserved_win = ?, standout_players = ? WHERE id = ?",
        )
        .bind(comments)
        .bind(rating)
        .bind(how_did_you_watch)
        .bind(viewing_time)
        .bind(deserved_win)
        .bind(Json(standout_players))
        .bind(log_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_log(log_id).await
    }

    /// Delete a log permanently. Returns false for unknown ids.
    pub async fn delete_log(&self, log_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM logs WHERE id = ?")
            .bind(log_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected() > 0)
    }

    // ─── List Operations ─────────────────────────────────────────

    /// Insert a list and its log links in one transaction.
    ///
    /// The link set must not be half-written, so this is the one
    /// multi-statement write in the store.
    pub async fn insert_list(&self, list: &List, log_ids: &[Uuid]) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        sqlx::query(
            "INSERT INTO lists (id, user_id, name, description, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(list.id)
        .bind(list.user_id)
        .bind(&list.name)
        .bind(&list.description)
        .bind(list.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        for log_id in log_ids {
            sqlx::query("INSERT INTO list_logs (list_id, log_id) VALUES (?, ?)")
                .bind(list.id)
                .bind(log_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all lists, optionally scoped to one user, most recent first.
    pub async fn get_lists(&self, user_id: Option<Uuid>) -> Result<Vec<List>, AppError> {
        let query = match user_id {
            Some(user_id) => {
                sqlx::query_as::<_, List>(
                    "SELECT * FROM lists WHERE user_id = ? ORDER BY created_at DESC",
                )
                .bind(user_id)
            }
            None => sqlx::query_as::<_, List>("SELECT * FROM lists ORDER BY created_at DESC"),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get the logs linked into a list, most recent first.
    pub async fn get_logs_for_list(&self, list_id: Uuid) -> Result<Vec<Log>, AppError> {
        sqlx::query_as::<_, Log>(
            "SELECT logs.* FROM logs \
             JOIN list_logs ON list_logs.log_id = logs.id \
             WHERE list_logs.list_id = ? \
             ORDER BY logs.created_at DESC",
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }

    // ─── Journal Operations ──────────────────────────────────────

    /// Insert a journal row. Journals only surface through profile counts.
    pub async fn insert_journal(
        &self,
        user_id: Uuid,
        title: &str,
        body: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO journals (id, user_id, title, body, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(title)
        .bind(body)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
