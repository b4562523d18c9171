use std::{str::FromStr, time::Duration};

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    Row, SqlitePool,
};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use dtimelog_core::GreetingRecord;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Top-level database handle that owns the SQLite connection pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Establishes a new SQLite connection pool for the provided connection string.
    ///
    /// Pragmas are part of the connect options so every pooled connection
    /// carries them. In-memory databases are limited to a single connection
    /// because every connection would otherwise see its own empty database.
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = connect_options(database_url)?;
        let max_connections = if is_in_memory(database_url) { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(StorageError::Connect)?;

        debug!(stage = "storage", max_connections, "sqlite pool ready");

        Ok(Self { pool })
    }

    /// Applies migrations located under `migrations/`.
    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(StorageError::Migration)?;
        Ok(())
    }

    /// Returns a handle for reading and appending to the greeting log.
    pub fn greeting_log(&self) -> GreetingLogRepository {
        GreetingLogRepository {
            pool: self.pool.clone(),
        }
    }

    /// Exposes the inner pool when lower level access is required.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, StorageError> {
    let options =
        SqliteConnectOptions::from_str(database_url).map_err(StorageError::InvalidUrl)?;
    Ok(options
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(BUSY_TIMEOUT))
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// General storage level errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid sqlite url: {0}")]
    InvalidUrl(sqlx::Error),
    #[error("failed to connect to sqlite: {0}")]
    Connect(sqlx::Error),
    #[error("failed to run database migrations: {0}")]
    Migration(MigrateError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Repository responsible for the `greeting_log` table.
#[derive(Clone)]
pub struct GreetingLogRepository {
    pool: SqlitePool,
}

impl GreetingLogRepository {
    /// Appends a greeting and returns the generated row id.
    pub async fn insert(&self, record: &GreetingRecord) -> Result<String, GreetingLogError> {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT INTO greeting_log (id, greeting, name, message, greeted_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&record.greeting)
        .bind(&record.name)
        .bind(&record.message)
        .bind(to_rfc3339(record.greeted_at))
        .execute(&self.pool)
        .await?;

        debug!(stage = "storage", %id, name = %record.name, "greeting logged");
        Ok(id)
    }

    /// Lists the most recent greetings, newest first.
    pub async fn list_recent(&self, limit: u32) -> Result<Vec<GreetingLogEntry>, GreetingLogError> {
        let rows = sqlx::query(
            "SELECT id, greeting, name, message, greeted_at FROM greeting_log \
             ORDER BY greeted_at DESC, id DESC LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let greeted_at: String = row.get("greeted_at");
                Ok(GreetingLogEntry {
                    id: row.get("id"),
                    record: GreetingRecord {
                        greeting: row.get("greeting"),
                        name: row.get("name"),
                        message: row.get("message"),
                        greeted_at: parse_rfc3339(&greeted_at)?,
                    },
                })
            })
            .collect()
    }

    /// Counts how many times `name` has been greeted.
    pub async fn count_for_name(&self, name: &str) -> Result<u64, GreetingLogError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM greeting_log WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.get("count");
        Ok(count as u64)
    }
}

/// Greeting log row together with its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingLogEntry {
    pub id: String,
    pub record: GreetingRecord,
}

/// Errors that can occur when reading or writing the greeting log.
#[derive(Debug, Error)]
pub enum GreetingLogError {
    #[error("stored timestamp is not valid rfc3339: {0}")]
    InvalidTimestamp(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn to_rfc3339(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, GreetingLogError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| GreetingLogError::InvalidTimestamp(value.to_string()))
}
